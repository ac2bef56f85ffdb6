use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginRequest, RegisterSchoolRequest};
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// `POST /auth/login`. Does not touch the session; see [`Self::sign_in`].
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post("/auth/login", request).await
    }

    /// `POST /auth/register-school`: creates the school and its principal.
    pub async fn register_school(
        &self,
        request: &RegisterSchoolRequest,
    ) -> Result<AuthResponse, ApiError> {
        self.post("/auth/register-school", request).await
    }

    /// `GET /auth/me`: the identity behind the current token.
    pub async fn me(&self) -> Result<AuthResponse, ApiError> {
        self.get("/auth/me", Vec::new()).await
    }

    /// Log in and, on success, make the result the current session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let payload = self.login(&request).await?;
        tracing::info!("signed in as {}", payload.user.email);
        self.session().login(payload.clone());
        Ok(payload)
    }

    /// Register a school and sign in as its principal.
    pub async fn register_and_sign_in(
        &self,
        request: &RegisterSchoolRequest,
    ) -> Result<AuthResponse, ApiError> {
        let payload = self.register_school(request).await?;
        tracing::info!("registered school {}", payload.school.name);
        self.session().login(payload.clone());
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use serde_json::json;
    use store::{KeyValueStore, MemoryStore, TOKEN_KEY};

    use crate::testing::{auth_json, ScriptedTransport};
    use crate::transport::Method;
    use crate::{ApiClient, ApiError, RegisterSchoolRequest, SessionStore};

    fn client(transport: &ScriptedTransport, storage: &MemoryStore) -> ApiClient<ScriptedTransport, MemoryStore> {
        ApiClient::new(transport.clone(), SessionStore::new(storage.clone()))
    }

    #[tokio::test]
    async fn test_sign_in_stores_session() {
        let transport = ScriptedTransport::new();
        transport.on(Method::Post, "/auth/login", 200, auth_json("principal", "tok-1"));
        let storage = MemoryStore::new();
        let api = client(&transport, &storage);

        let payload = api.sign_in(" head@school.test ", "secret").await.unwrap();
        assert_eq!(payload.user.email, "head@school.test");
        assert!(api.session().is_principal());
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-1"));

        let sent = transport.requests_to(Method::Post, "/auth/login");
        assert_eq!(
            sent[0].body,
            Some(json!({ "email": "head@school.test", "password": "secret" }))
        );
        assert_eq!(sent[0].bearer, None);
    }

    #[tokio::test]
    async fn test_invalid_login_leaves_no_token() {
        let transport = ScriptedTransport::new();
        transport.on(Method::Post, "/auth/login", 401, json!({ "detail": "Invalid email or password" }));
        let storage = MemoryStore::new();
        let redirects = Arc::new(AtomicUsize::new(0));
        let counter = redirects.clone();
        let api = client(&transport, &storage).with_unauthorized_hook(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let err = api.sign_in("head@school.test", "wrong").await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(!api.session().is_authenticated());
        assert_eq!(redirects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_rejected() {
        let transport = ScriptedTransport::new();
        transport.on(Method::Post, "/auth/register-school", 400, json!({ "detail": "Email already registered" }));
        let storage = MemoryStore::new();
        let api = client(&transport, &storage);

        let request = RegisterSchoolRequest {
            school_name: "Greenfield".to_string(),
            user_name: "Meera".to_string(),
            user_email: "head@school.test".to_string(),
            user_password: "secret".to_string(),
            ..Default::default()
        };
        let err = api.register_and_sign_in(&request).await.unwrap_err();
        assert_eq!(err.user_message("Registration failed"), "Email already registered");
        assert!(storage.is_empty());
    }
}
