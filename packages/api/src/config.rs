//! # Client configuration: `scholify.toml` / environment
//!
//! Tells the gateway where the backend lives.
//!
//! ```toml
//! [api]
//! base_url = "https://school.example/api"   # everything is relative to this
//! timeout_secs = 30                          # native builds only; 0 disables
//! ```
//!
//! ## Resolution
//!
//! [`ClientConfig::from_env`] is what the app uses:
//!
//! | Build | Source |
//! |-------|--------|
//! | native | `.env` (via `dotenvy`) then `SCHOLIFY_API_URL` / `SCHOLIFY_API_TIMEOUT_SECS` |
//! | wasm | `SCHOLIFY_API_URL` captured at compile time |
//!
//! Anything unset falls back to [`ClientConfig::default`]: `base_url = "/api"`
//! (same origin as the page) and a 30 second timeout.

use serde::{Deserialize, Serialize};

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Backend endpoint settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. 0 disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                ..ApiConfig::default()
            },
        }
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.api.timeout_secs = secs;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "scholify.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Resolve the configuration for the running platform.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(url) = std::env::var("SCHOLIFY_API_URL") {
            config.api.base_url = url;
        }
        if let Ok(raw) = std::env::var("SCHOLIFY_API_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => config.api.timeout_secs = secs,
                Err(_) => tracing::warn!("ignoring invalid SCHOLIFY_API_TIMEOUT_SECS={raw}"),
            }
        }
        config
    }

    /// Resolve the configuration for the running platform.
    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        match option_env!("SCHOLIFY_API_URL") {
            Some(url) => Self::new(url),
            None => Self::default(),
        }
    }

    /// Join an endpoint path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api.base_url, "/api");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ClientConfig::new("https://school.example/api").with_timeout(5);
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new("https://school.example/api/");
        assert_eq!(config.url("/auth/me"), "https://school.example/api/auth/me");
        assert_eq!(config.url("classes"), "https://school.example/api/classes");
        assert_eq!(ClientConfig::default().url("/fee-bills"), "/api/fee-bills");
    }
}
