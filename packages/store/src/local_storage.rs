//! # Browser `localStorage` store
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the **web platform**.
//! Entries live in the page origin's `window.localStorage`, so a signed-in
//! session survives reloads and new tabs.
//!
//! An optional prefix scopes the keys (`"<prefix>:token"`), which keeps two
//! deployments served from the same origin apart. Without a prefix the bare
//! key names are used.
//!
//! Reads swallow errors (private browsing modes may deny storage access); a
//! denied storage behaves like an empty one. Writes surface the failure.

use crate::kv::{KeyValueStore, StoreError};

/// `window.localStorage`-backed KeyValueStore.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    prefix: Option<String>,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self::with_prefix(None)
    }

    pub fn with_prefix(prefix: Option<&str>) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
        }
    }

    fn scoped(&self, key: &str) -> String {
        match &self.prefix {
            Some(p) => format!("{p}:{key}"),
            None => key.to_string(),
        }
    }

    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage().ok()?.get_item(&self.scoped(key)).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(&self.scoped(key), value)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(&self.scoped(key))
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}
