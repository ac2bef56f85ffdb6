//! Error type for every gateway call.

/// Failure of an API operation.
///
/// The variants follow how the UI reacts: validation problems never reach the
/// network, `Unauthorized` has already logged the session out, `Rejected`
/// carries the backend's reason, and transport/decode failures get a generic
/// message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("session expired, please sign in again")]
    Unauthorized,

    #[error("request rejected ({status}): {}", .detail.as_deref().unwrap_or("no reason given"))]
    Rejected { status: u16, detail: Option<String> },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Text for the single notification shown for a failed action.
    ///
    /// Validation text and the backend's stated reason are shown as-is;
    /// everything else falls back to the view's generic message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Unauthorized => self.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Extract the human-readable reason from an error body.
///
/// The backend answers `{"detail": "..."}`; request-validation failures
/// answer `{"detail": [{"msg": "..."}, ...]}`.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}
