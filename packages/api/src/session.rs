//! # Session store: who is acting, and as what role
//!
//! [`SessionStore`] is the only process-wide mutable state of the client. It
//! keeps the signed-in user, their school and the bearer token in memory and
//! mirrors them into a [`KeyValueStore`] under [`store::TOKEN_KEY`],
//! [`store::USER_KEY`] and [`store::SCHOOL_KEY`].
//!
//! ## Lifecycle
//!
//! | Method | Effect |
//! |--------|--------|
//! | [`initialize`](SessionStore::initialize) | Once per app start. Revalidates a persisted token with `GET /auth/me`; any failure logs out. Never errors. |
//! | [`login`](SessionStore::login) | Stores token, user and school in storage and memory under one lock. |
//! | [`logout`](SessionStore::logout) | Removes all three keys and clears memory. |
//!
//! Only `login`, `logout` and the gateway's 401 path write the store.
//!
//! ## Reads
//!
//! `is_authenticated`, `is_principal` and `is_teacher` are recomputed from the
//! current state on every call. [`snapshot`](SessionStore::snapshot) hands the
//! UI an owned copy with the same accessors.
//!
//! Clones share state, so the gateway and the UI observe the same session.

use std::sync::{Arc, Mutex, MutexGuard};

use store::{KeyValueStore, SCHOOL_KEY, SESSION_KEYS, TOKEN_KEY, USER_KEY};

use crate::client::ApiClient;
use crate::models::{AuthResponse, SchoolInfo, UserInfo};
use crate::transport::Transport;

/// Owned copy of the session at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<UserInfo>,
    pub school: Option<SchoolInfo>,
    pub token: Option<String>,
    /// True until [`SessionStore::initialize`] has completed.
    pub loading: bool,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_principal(&self) -> bool {
        self.user.as_ref().is_some_and(UserInfo::is_principal)
    }

    pub fn is_teacher(&self) -> bool {
        self.user.as_ref().is_some_and(UserInfo::is_teacher)
    }
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<UserInfo>,
    school: Option<SchoolInfo>,
    token: Option<String>,
    started: bool,
    initialized: bool,
}

/// Shared session state backed by durable storage.
#[derive(Clone, Debug)]
pub struct SessionStore<S: KeyValueStore> {
    storage: S,
    state: Arc<Mutex<SessionState>>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Restore the session persisted by a previous run.
    ///
    /// Only the first call does anything; later calls return immediately.
    pub async fn initialize<T: Transport>(&self, client: &ApiClient<T, S>) {
        {
            let mut state = self.lock();
            if state.started {
                return;
            }
            state.started = true;
        }

        if self.stored_token().is_some() {
            match client.me().await {
                Ok(payload) => {
                    tracing::info!("restored session for {}", payload.user.email);
                    self.login(payload);
                }
                Err(e) => {
                    tracing::warn!("session revalidation failed: {e}");
                    self.logout();
                }
            }
        } else {
            tracing::debug!("no persisted session");
        }

        self.lock().initialized = true;
    }

    /// Become the identity described by `payload`.
    pub fn login(&self, payload: AuthResponse) {
        let mut state = self.lock();

        if let Err(e) = self.storage.set(TOKEN_KEY, &payload.access_token) {
            tracing::warn!("could not persist token: {e}");
        }
        if let Err(e) = self.storage.set_json(USER_KEY, &payload.user) {
            tracing::warn!("could not persist user: {e}");
        }
        if let Err(e) = self.storage.set_json(SCHOOL_KEY, &payload.school) {
            tracing::warn!("could not persist school: {e}");
        }

        state.user = Some(payload.user);
        state.school = Some(payload.school);
        state.token = Some(payload.access_token);
    }

    /// Forget the current identity, in memory and in storage.
    pub fn logout(&self) {
        let mut state = self.lock();

        for key in SESSION_KEYS {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!("could not clear `{key}`: {e}");
            }
        }

        state.user = None;
        state.school = None;
        state.token = None;
    }

    /// Token as currently persisted, read at call time.
    pub fn stored_token(&self) -> Option<String> {
        let _state = self.lock();
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn loading(&self) -> bool {
        !self.lock().initialized
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            user: state.user.clone(),
            school: state.school.clone(),
            token: state.token.clone(),
            loading: !state.initialized,
        }
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.lock().user.clone()
    }

    pub fn school(&self) -> Option<SchoolInfo> {
        self.lock().school.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    pub fn is_principal(&self) -> bool {
        self.snapshot().is_principal()
    }

    pub fn is_teacher(&self) -> bool {
        self.snapshot().is_teacher()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{auth_json, ScriptedTransport};
    use crate::transport::Method;
    use store::MemoryStore;

    fn payload(role: &str) -> AuthResponse {
        serde_json::from_value(auth_json(role, "tok-1")).unwrap()
    }

    #[test]
    fn test_login_sets_flags_and_storage() {
        let storage = MemoryStore::new();
        let session = SessionStore::new(storage.clone());
        assert!(!session.is_authenticated());

        session.login(payload("principal"));
        assert!(session.is_authenticated());
        assert!(session.is_principal());
        assert!(!session.is_teacher());
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-1"));
        assert!(storage.get(USER_KEY).is_some());
        assert!(storage.get(SCHOOL_KEY).is_some());

        session.login(payload("teacher"));
        assert!(session.is_teacher());
        assert!(!session.is_principal());
    }

    #[test]
    fn test_logout_clears_everything() {
        let storage = MemoryStore::new();
        let session = SessionStore::new(storage.clone());
        session.login(payload("principal"));

        session.logout();
        assert!(!session.is_authenticated());
        assert!(!session.is_principal());
        assert!(!session.is_teacher());
        for key in SESSION_KEYS {
            assert!(storage.get(key).is_none(), "{key} still stored");
        }
        assert!(session.user().is_none());
        assert!(session.school().is_none());
    }

    #[test]
    fn test_stored_token_is_read_fresh() {
        let storage = MemoryStore::new();
        let session = SessionStore::new(storage.clone());
        assert!(session.stored_token().is_none());

        storage.set(TOKEN_KEY, "written-elsewhere").unwrap();
        assert_eq!(session.stored_token().as_deref(), Some("written-elsewhere"));

        storage.set(TOKEN_KEY, "").unwrap();
        assert!(session.stored_token().is_none());
    }

    #[tokio::test]
    async fn test_initialize_without_token_skips_network() {
        let transport = ScriptedTransport::new();
        let session = SessionStore::new(MemoryStore::new());
        let client = ApiClient::new(transport.clone(), session.clone());

        assert!(session.loading());
        session.initialize(&client).await;
        assert!(!session.loading());
        assert!(!session.is_authenticated());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_restores_valid_session() {
        let transport = ScriptedTransport::new();
        transport.on(Method::Get, "/auth/me", 200, auth_json("teacher", "tok-fresh"));
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok-old").unwrap();
        let session = SessionStore::new(storage.clone());
        let client = ApiClient::new(transport.clone(), session.clone());

        session.initialize(&client).await;
        assert!(!session.loading());
        assert!(session.is_teacher());
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-fresh"));

        let sent = transport.requests_to(Method::Get, "/auth/me");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].bearer.as_deref(), Some("tok-old"));
    }

    #[tokio::test]
    async fn test_initialize_failure_logs_out() {
        let transport = ScriptedTransport::new();
        transport.fail(Method::Get, "/auth/me", "offline");
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok-old").unwrap();
        storage.set(USER_KEY, "{}").unwrap();
        let session = SessionStore::new(storage.clone());
        let client = ApiClient::new(transport, session.clone());

        session.initialize(&client).await;
        assert!(!session.loading());
        assert!(!session.is_authenticated());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let transport = ScriptedTransport::new();
        transport.on(Method::Get, "/auth/me", 200, auth_json("principal", "tok"));
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        let session = SessionStore::new(storage);
        let client = ApiClient::new(transport.clone(), session.clone());

        session.initialize(&client).await;
        session.initialize(&client).await;
        assert_eq!(transport.requests().len(), 1);
    }
}
