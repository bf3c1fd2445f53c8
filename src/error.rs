//! Failure taxonomy for provider adapters.
//!
//! Every adapter returns [`SourceError`] and nothing else. The fallback
//! composer turns any of these into mock data plus a degraded
//! [`crate::model::SourceHealth`], so none of them ever reach the render pass.

use thiserror::Error;

/// Why a provider could not produce live data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Network failure, timeout, rate limit or upstream 5xx.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// Credential rejected or expired.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The requested channel, list or document does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A country identifier could not be mapped to ISO alpha-3.
    #[error("unresolvable country identifier: {0}")]
    Unresolvable(String),

    /// Response shape was not what the adapter expected.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Credential was never configured. Routed exactly like `Unauthorized`.
    #[error("{0} is not configured")]
    NotConfigured(String),

    /// The daily series came back shorter than the minimum viable length.
    #[error("only {got} daily points returned, need at least {needed}")]
    TooFewPoints { got: usize, needed: usize },

    /// Catch-all for adapter bugs (panics, aborted tasks).
    #[error("internal adapter failure: {0}")]
    Internal(String),
}

impl SourceError {
    /// Whether a second attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SourceError::Unavailable(_))
    }

    /// Whether this failure points at a bug rather than an upstream condition.
    pub fn is_internal(&self) -> bool {
        matches!(self, SourceError::Internal(_))
    }

    /// Map a non-success HTTP status to the taxonomy.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        let message = format!("{} returned HTTP {}", context, status.as_u16());
        match status.as_u16() {
            401 | 403 => SourceError::Unauthorized(message),
            404 => SourceError::NotFound(message),
            408 | 429 => SourceError::Unavailable(message),
            s if s >= 500 => SourceError::Unavailable(message),
            _ => SourceError::Malformed(message),
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SourceError::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            SourceError::from_status(status, "upstream")
        } else {
            SourceError::Unavailable(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Malformed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            SourceError::from_status(StatusCode::UNAUTHORIZED, "x"),
            SourceError::Unauthorized(_)
        ));
        assert!(matches!(
            SourceError::from_status(StatusCode::FORBIDDEN, "x"),
            SourceError::Unauthorized(_)
        ));
        assert!(matches!(
            SourceError::from_status(StatusCode::NOT_FOUND, "x"),
            SourceError::NotFound(_)
        ));
        assert!(matches!(
            SourceError::from_status(StatusCode::TOO_MANY_REQUESTS, "x"),
            SourceError::Unavailable(_)
        ));
        assert!(matches!(
            SourceError::from_status(StatusCode::BAD_GATEWAY, "x"),
            SourceError::Unavailable(_)
        ));
        assert!(matches!(
            SourceError::from_status(StatusCode::BAD_REQUEST, "x"),
            SourceError::Malformed(_)
        ));
    }

    #[test]
    fn test_only_unavailable_is_retryable() {
        assert!(SourceError::Unavailable("timeout".into()).is_retryable());
        assert!(!SourceError::Unauthorized("bad".into()).is_retryable());
        assert!(!SourceError::NotConfigured("KEY".into()).is_retryable());
    }

    #[test]
    fn test_not_configured_message_names_key() {
        let e = SourceError::NotConfigured("YOUTUBE_API_KEY".into());
        assert_eq!(e.to_string(), "YOUTUBE_API_KEY is not configured");
    }
}
