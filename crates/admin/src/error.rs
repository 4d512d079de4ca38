//! Unified error handling for the admin API client.
//!
//! Every failure surfaced by the HTTP client or the service layer is an
//! [`ApiError`]. Nothing in this crate retries or swallows these errors; the
//! caller decides how to present them.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::TokenStoreError;

/// Message used when a failed envelope carries no `message` of its own.
pub const ENVELOPE_FALLBACK_MESSAGE: &str = "Request failed";

/// Errors that can occur when talking to the store backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not settle within the configured window and was aborted.
    #[error("Request timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    /// The backend answered with a non-2xx status.
    ///
    /// `message` is the backend's own `message` field when the error body
    /// had one, otherwise `HTTP error! status: <code>`.
    #[error("{message}")]
    Http {
        /// HTTP status returned by the backend.
        status: StatusCode,
        /// Human-readable error message.
        message: String,
    },

    /// The backend answered 2xx but the envelope reported `success: false`.
    #[error("{0}")]
    Envelope(String),

    /// The envelope reported success but carried no `data`.
    #[error("Response contained no data")]
    MissingData,

    /// Transport-level failure (DNS, refused connection, malformed URL, ...).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response body could not be decoded as the expected type.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request payload could not be serialized.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// The token store could not be read or written.
    #[error("Token store error: {0}")]
    TokenStore(#[from] TokenStoreError),
}

impl ApiError {
    /// Build the error for a non-2xx response from its (best-effort) JSON body.
    pub(crate) fn from_status(status: StatusCode, body: &serde_json::Value) -> Self {
        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(
                || format!("HTTP error! status: {}", status.as_u16()),
                str::to_owned,
            );
        Self::Http { status, message }
    }

    /// Whether the request was aborted by the timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Whether the backend rejected the request as unauthenticated.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// HTTP status of a non-2xx response, if this error came from one.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_error_uses_backend_message() {
        let err = ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            &json!({"success": false, "message": "Unauthorized"}),
        );
        assert_eq!(err.to_string(), "Unauthorized");
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_http_error_fallback_message() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, &json!({}));
        assert_eq!(err.to_string(), "HTTP error! status: 502");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_http_error_ignores_non_string_message() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, &json!({"message": 42}));
        assert_eq!(err.to_string(), "HTTP error! status: 400");
    }

    #[test]
    fn test_timeout_display() {
        let err = ApiError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Request timed out after 10 seconds");
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_envelope_error_display_is_message() {
        let err = ApiError::Envelope("Product not found".to_string());
        assert_eq!(err.to_string(), "Product not found");
    }
}
