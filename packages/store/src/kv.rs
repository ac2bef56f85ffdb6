//! # Key-value storage: the durable half of the client session
//!
//! The dashboard keeps a tiny amount of state across page reloads: the
//! credential token and a cached snapshot of the signed-in user and school.
//! Everything goes through the [`KeyValueStore`] trait so the same session
//! logic runs against browser `localStorage` ([`crate::LocalStorageStore`]),
//! a directory on disk ([`crate::FileStore`]) or plain memory
//! ([`crate::MemoryStore`]).
//!
//! ## Keys
//!
//! | Constant | Key | Value |
//! |----------|-----|-------|
//! | [`TOKEN_KEY`] | `"token"` | raw bearer token |
//! | [`USER_KEY`] | `"user"` | JSON-encoded user |
//! | [`SCHOOL_KEY`] | `"school"` | JSON-encoded school |
//!
//! [`SESSION_KEYS`] lists all three; logout removes every one of them.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON snapshot of the signed-in user.
pub const USER_KEY: &str = "user";
/// Key holding the JSON snapshot of the user's school.
pub const SCHOOL_KEY: &str = "school";

/// Every key owned by the session, in write order.
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USER_KEY, SCHOOL_KEY];

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Synchronous string key-value storage.
///
/// Reads never fail: a missing, unreadable or corrupted entry is `None`.
/// Writes report failures so callers can log them.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Read and decode a JSON value. Undecodable entries read as `None`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("discarding undecodable `{key}` entry: {e}");
                None
            }
        }
    }

    /// Encode a value as JSON and store it.
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}
