use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::kv::{KeyValueStore, StoreError};

/// In-memory KeyValueStore for testing and native fallback.
///
/// Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{SCHOOL_KEY, SESSION_KEYS, TOKEN_KEY, USER_KEY};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get(TOKEN_KEY).is_none());

        store.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));

        // Overwrite
        store.set(TOKEN_KEY, "def").unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("def"));

        store.remove(TOKEN_KEY).unwrap();
        assert!(store.get(TOKEN_KEY).is_none());

        // Removing a missing key is fine
        store.remove(TOKEN_KEY).unwrap();
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set(USER_KEY, "{}").unwrap();
        assert_eq!(other.get(USER_KEY).as_deref(), Some("{}"));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_json_roundtrip_and_corruption() {
        let store = MemoryStore::new();
        let value = Sample {
            name: "Greenfield".to_string(),
            count: 3,
        };
        store.set_json(SCHOOL_KEY, &value).unwrap();
        assert_eq!(store.get_json::<Sample>(SCHOOL_KEY), Some(value));

        store.set(SCHOOL_KEY, "not json").unwrap();
        assert_eq!(store.get_json::<Sample>(SCHOOL_KEY), None);
    }

    #[test]
    fn test_session_keys_cover_everything() {
        let store = MemoryStore::new();
        for key in SESSION_KEYS {
            store.set(key, "x").unwrap();
        }
        assert_eq!(store.len(), 3);
        for key in SESSION_KEYS {
            store.remove(key).unwrap();
        }
        assert!(store.is_empty());
    }
}
