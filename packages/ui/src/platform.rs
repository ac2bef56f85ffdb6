//! Shared client constructor for all platforms.
//!
//! The session is persisted in a platform-appropriate [`store::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): browser `localStorage` via [`store::LocalStorageStore`]
//! - **Desktop / Mobile** (native): one file per key via [`store::FileStore`]
//! - **WASM without `web`**: in memory, lost on reload

use api::{ApiClient, ClientConfig, ReqwestTransport, SessionStore};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::LocalStorageStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStorage = store::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = store::FileStore;

/// The gateway client every view talks through.
pub type AppClient = ApiClient<ReqwestTransport, PlatformStorage>;

/// Create the platform's session storage.
pub fn make_storage() -> PlatformStorage {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("scholify");
        store::FileStore::new(base)
    }
}

/// Create the gateway client from the environment's configuration.
///
/// A 401 on an authenticated request sends the browser back to `/login`.
pub fn make_client() -> AppClient {
    let config = ClientConfig::from_env();
    tracing::info!("using backend at {}", config.api.base_url);
    let session = SessionStore::new(make_storage());
    ApiClient::new(ReqwestTransport::new(config), session)
        .with_unauthorized_hook(api::redirect_to_login)
}
