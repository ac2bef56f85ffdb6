//! # Transport: the HTTP seam under the gateway
//!
//! [`crate::ApiClient`] never talks to `reqwest` directly. It builds an
//! [`HttpRequest`] (method, path relative to the API base, query pairs, JSON
//! body, bearer token) and hands it to a [`Transport`]. The production
//! implementation is [`ReqwestTransport`]; tests script responses with
//! [`crate::testing::ScriptedTransport`].
//!
//! A transport only reports *transport* failures (no connection, timeout,
//! unreadable body) as [`ApiError::Network`]. Every HTTP status, including
//! 401 and 5xx, comes back as an [`HttpResponse`]; interpreting it is the
//! gateway's job.

use std::future::Future;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// HTTP verbs used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A request as seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path relative to the API base, e.g. `"/fee-bills"`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Bearer token to send in the `Authorization` header.
    pub bearer: Option<String>,
}

/// A response as seen by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async trait for sending one HTTP request.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>>;
}

/// `reqwest`-backed transport (browser `fetch` on wasm, hyper on native).
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    /// Build the HTTP client. If the configured builder cannot be built the
    /// default client is used instead.
    pub fn new(config: ClientConfig) -> Self {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = if config.api.timeout_secs > 0 {
            builder.timeout(std::time::Duration::from_secs(config.api.timeout_secs))
        } else {
            builder
        };
        let http = builder.build().unwrap_or_else(|e| {
            tracing::error!("failed to build HTTP client: {e}");
            reqwest::Client::default()
        });
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for a path. A relative base (`"/api"`) is resolved
    /// against the page origin in the browser.
    fn absolute_url(&self, path: &str) -> String {
        let url = self.config.url(path);
        #[cfg(target_arch = "wasm32")]
        {
            if url.starts_with('/') {
                if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
                    return format!("{origin}{url}");
                }
            }
        }
        url
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.absolute_url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
