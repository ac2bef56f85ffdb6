use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::DashboardStats;
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get("/dashboard/stats", Vec::new()).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use serde_json::json;
    use store::{KeyValueStore, MemoryStore, SESSION_KEYS, TOKEN_KEY};

    use crate::testing::ScriptedTransport;
    use crate::transport::Method;
    use crate::{ApiClient, ApiError, SessionStore};

    #[tokio::test]
    async fn test_stats_decode() {
        let transport = ScriptedTransport::new();
        transport.on(
            Method::Get,
            "/dashboard/stats",
            200,
            json!({
                "total_students": 120, "total_classes": 12, "pending_fees": 7,
                "today_attendance_rate": 93.5, "recent_admissions": 4
            }),
        );
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        let api = ApiClient::new(transport, SessionStore::new(storage));

        let stats = api.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_students, 120);
        assert_eq!(stats.today_attendance_rate, 93.5);
    }

    #[tokio::test]
    async fn test_expired_token_on_any_endpoint_forces_logout() {
        let transport = ScriptedTransport::new();
        transport.on(Method::Get, "/dashboard/stats", 401, json!({ "detail": "Token expired" }));
        let storage = MemoryStore::new();
        for key in SESSION_KEYS {
            storage.set(key, "x").unwrap();
        }
        let redirects = Arc::new(AtomicUsize::new(0));
        let counter = redirects.clone();
        let api = ApiClient::new(transport, SessionStore::new(storage.clone()))
            .with_unauthorized_hook(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        assert_eq!(api.dashboard_stats().await.unwrap_err(), ApiError::Unauthorized);
        assert!(storage.is_empty());
        assert_eq!(redirects.load(Ordering::SeqCst), 1);
    }
}
