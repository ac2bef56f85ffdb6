//! # Filesystem-backed key-value store
//!
//! [`FileStore`] persists each key as one small file under a base directory.
//! It is the native (non-browser) backend, so a desktop build keeps its
//! session across restarts the same way the browser build keeps it in
//! `localStorage`.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── token      # raw bearer token
//! ├── user       # JSON
//! └── school     # JSON
//! ```

use std::path::PathBuf;

use crate::kv::{KeyValueStore, StoreError};

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.entry_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{TOKEN_KEY, USER_KEY};

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = std::env::temp_dir().join(format!("scholify_store_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        store.set(TOKEN_KEY, "token-123").unwrap();
        store.set(USER_KEY, r#"{"name":"Asha"}"#).unwrap();

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("token-123"));
        assert_eq!(reopened.get(USER_KEY).as_deref(), Some(r#"{"name":"Asha"}"#));

        reopened.remove(TOKEN_KEY).unwrap();
        assert!(store.get(TOKEN_KEY).is_none());
        // Second removal is not an error
        reopened.remove(TOKEN_KEY).unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
