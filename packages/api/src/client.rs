//! # API gateway
//!
//! [`ApiClient`] is the single choke point through which every backend call
//! passes. For each request it:
//!
//! 1. reads the bearer token from the [`SessionStore`]'s storage at send
//!    time (never a cached copy), so a login or logout elsewhere is honoured
//!    by the very next request;
//! 2. sends through its [`Transport`];
//! 3. classifies the response:
//!
//! | Outcome | Result |
//! |---------|--------|
//! | 2xx | body decoded into the caller's type (`Decode` on mismatch) |
//! | 401 | session logged out, redirect hook fired if a token was sent, `Unauthorized` |
//! | other status | `Rejected { status, detail }` with the backend's `detail` |
//! | transport failure | `Network` |
//!
//! The redirect hook is skipped when no token accompanied the request, so a
//! rejected sign-in leaves the user on the login page with an error rather
//! than reloading it.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::KeyValueStore;

use crate::error::{error_detail, ApiError};
use crate::session::SessionStore;
use crate::transport::{HttpRequest, Method, Transport};

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Typed gateway to the school backend.
#[derive(Clone)]
pub struct ApiClient<T, S: KeyValueStore> {
    transport: T,
    session: SessionStore<S>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl<T: fmt::Debug, S: KeyValueStore + fmt::Debug> fmt::Debug for ApiClient<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("transport", &self.transport)
            .field("session", &self.session)
            .field("on_unauthorized", &self.on_unauthorized.is_some())
            .finish()
    }
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub fn new(transport: T, session: SessionStore<S>) -> Self {
        Self {
            transport,
            session,
            on_unauthorized: None,
        }
    }

    /// Run `hook` after a 401 on an authenticated request.
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request and decode a successful body into `R`.
    ///
    /// An empty success body decodes as JSON `null`, so `R = ()` or
    /// `R = serde_json::Value` accept bodiless responses.
    pub async fn send<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> Result<R, ApiError> {
        let bearer = self.session.stored_token();
        let had_credential = bearer.is_some();
        let request = HttpRequest {
            method,
            path: path.to_string(),
            query,
            body,
            bearer,
        };

        tracing::debug!("{method:?} {path}");
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!("{method:?} {path} failed: {e}");
            e
        })?;

        if response.status == 401 {
            tracing::info!("{method:?} {path} unauthorized, ending session");
            self.session.logout();
            if had_credential {
                if let Some(hook) = &self.on_unauthorized {
                    hook();
                }
            }
            return Err(ApiError::Unauthorized);
        }

        if !response.is_success() {
            let detail = error_detail(&response.body);
            tracing::warn!(
                "{method:?} {path} rejected with {}: {}",
                response.status,
                detail.as_deref().unwrap_or("-")
            );
            return Err(ApiError::Rejected {
                status: response.status,
                detail,
            });
        }

        let text = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(text).map_err(|e| {
            tracing::warn!("{method:?} {path} returned an unexpected body: {e}");
            ApiError::Decode(e.to_string())
        })
    }

    pub(crate) async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<R, ApiError> {
        self.send(Method::Get, path, query, None).await
    }

    pub(crate) async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let body = encode(body)?;
        self.send(Method::Post, path, Vec::new(), Some(body)).await
    }

    pub(crate) async fn put<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let body = encode(body)?;
        self.send(Method::Put, path, Vec::new(), Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self.send(Method::Delete, path, Vec::new(), None).await?;
        Ok(())
    }
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Send the browser to the login page with a full reload.
#[cfg(target_arch = "wasm32")]
pub fn redirect_to_login() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href("/login") {
        tracing::error!("redirect to /login failed: {e:?}");
    }
}

/// Send the browser to the login page with a full reload.
///
/// Native builds have no page to reload; the router's guard takes over once
/// the session is cleared.
#[cfg(not(target_arch = "wasm32"))]
pub fn redirect_to_login() {
    tracing::warn!("session ended, login required");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use store::{MemoryStore, SCHOOL_KEY, TOKEN_KEY, USER_KEY};

    fn client_with(
        transport: &ScriptedTransport,
        storage: &MemoryStore,
    ) -> (ApiClient<ScriptedTransport, MemoryStore>, Arc<AtomicUsize>) {
        let redirects = Arc::new(AtomicUsize::new(0));
        let counter = redirects.clone();
        let client = ApiClient::new(transport.clone(), SessionStore::new(storage.clone()))
            .with_unauthorized_hook(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        (client, redirects)
    }

    #[tokio::test]
    async fn test_bearer_is_read_at_send_time() {
        let transport = ScriptedTransport::new();
        transport.on(Method::Get, "/classes", 200, json!({ "classes": [] }));
        let storage = MemoryStore::new();
        let (client, _) = client_with(&transport, &storage);

        let _: serde_json::Value = client.get("/classes", Vec::new()).await.unwrap();
        storage.set(TOKEN_KEY, "abc").unwrap();
        let _: serde_json::Value = client.get("/classes", Vec::new()).await.unwrap();
        storage.set(TOKEN_KEY, "xyz").unwrap();
        let _: serde_json::Value = client.get("/classes", Vec::new()).await.unwrap();

        let bearers: Vec<Option<String>> = transport
            .requests()
            .into_iter()
            .map(|r| r.bearer)
            .collect();
        assert_eq!(
            bearers,
            vec![None, Some("abc".to_string()), Some("xyz".to_string())]
        );
    }

    #[tokio::test]
    async fn test_401_with_token_clears_session_and_redirects() {
        let transport = ScriptedTransport::new();
        transport.on(Method::Get, "/students", 401, json!({ "detail": "Could not validate credentials" }));
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "stale").unwrap();
        storage.set(USER_KEY, "{}").unwrap();
        storage.set(SCHOOL_KEY, "{}").unwrap();
        let (client, redirects) = client_with(&transport, &storage);

        let result: Result<serde_json::Value, _> = client.get("/students", Vec::new()).await;
        assert_eq!(result.unwrap_err(), ApiError::Unauthorized);
        assert!(storage.is_empty());
        assert_eq!(redirects.load(Ordering::SeqCst), 1);
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_401_without_token_does_not_redirect() {
        let transport = ScriptedTransport::new();
        transport.on(Method::Post, "/auth/login", 401, json!({ "detail": "Invalid email or password" }));
        let storage = MemoryStore::new();
        let (client, redirects) = client_with(&transport, &storage);

        let result: Result<serde_json::Value, _> =
            client.post("/auth/login", &json!({ "email": "a@b.c" })).await;
        assert_eq!(result.unwrap_err(), ApiError::Unauthorized);
        assert_eq!(redirects.load(Ordering::SeqCst), 0);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_rejection_carries_detail() {
        let transport = ScriptedTransport::new();
        transport.on(
            Method::Put,
            "/student-fees/f1/mark-paid",
            400,
            json!({ "detail": "Fee is already marked as paid" }),
        );
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        let (client, redirects) = client_with(&transport, &storage);

        let result: Result<serde_json::Value, _> = client
            .put("/student-fees/f1/mark-paid", &json!({}))
            .await;
        assert_eq!(
            result.unwrap_err(),
            ApiError::Rejected {
                status: 400,
                detail: Some("Fee is already marked as paid".to_string()),
            }
        );
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok"));
        assert_eq!(redirects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let transport = ScriptedTransport::new();
        transport.fail(Method::Get, "/dashboard/stats", "connection refused");
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        let (client, _) = client_with(&transport, &storage);

        let result: Result<serde_json::Value, _> = client.get("/dashboard/stats", Vec::new()).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_empty_and_malformed_bodies() {
        let transport = ScriptedTransport::new();
        transport.on(Method::Get, "/classes", 200, json!("not an object"));
        let storage = MemoryStore::new();
        let (client, _) = client_with(&transport, &storage);

        #[derive(Debug, serde::Deserialize)]
        struct Shape {
            #[allow(dead_code)]
            classes: Vec<String>,
        }
        let result: Result<Shape, _> = client.get("/classes", Vec::new()).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));

        let empty = ScriptedTransport::new();
        empty.on(Method::Delete, "/students/s1", 204, serde_json::Value::Null);
        let (client, _) = client_with(&empty, &storage);
        client.delete("/students/s1").await.unwrap();
    }
}
