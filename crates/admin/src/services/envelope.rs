//! The `{ success, data, message }` envelope every endpoint answers with.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ENVELOPE_FALLBACK_MESSAGE};

/// Standard response wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful envelope carrying `data`.
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// A failed envelope with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

fn envelope_error(message: Option<String>) -> ApiError {
    ApiError::Envelope(
        message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| ENVELOPE_FALLBACK_MESSAGE.to_string()),
    )
}

/// Unwrap the payload of a successful envelope.
///
/// # Errors
///
/// Returns `ApiError::Envelope` with the backend's message (or
/// `Request failed`) when `success` is false, and `ApiError::MissingData`
/// when a successful envelope has no `data`.
pub fn handle_response<T>(response: ApiResponse<T>) -> Result<T, ApiError> {
    if !response.success {
        return Err(envelope_error(response.message));
    }
    response.data.ok_or(ApiError::MissingData)
}

/// Accept a successful envelope whether or not it carries `data`.
///
/// # Errors
///
/// Returns `ApiError::Envelope` when `success` is false.
pub fn handle_empty_response<T>(response: ApiResponse<T>) -> Result<(), ApiError> {
    if response.success {
        Ok(())
    } else {
        Err(envelope_error(response.message))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn parse(value: Value) -> ApiResponse<Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_success_unwraps_data() {
        let data = handle_response(parse(json!({"success": true, "data": {"_id": "p1"}}))).unwrap();
        assert_eq!(data, json!({"_id": "p1"}));
    }

    #[test]
    fn test_failure_carries_backend_message() {
        let err = handle_response(parse(json!({"success": false, "message": "Coupon expired"})))
            .unwrap_err();
        assert!(matches!(err, ApiError::Envelope(_)));
        assert_eq!(err.to_string(), "Coupon expired");
    }

    #[test]
    fn test_failure_without_message_uses_fallback() {
        let err = handle_response(parse(json!({"success": false}))).unwrap_err();
        assert_eq!(err.to_string(), "Request failed");
    }

    #[test]
    fn test_missing_success_flag_is_failure() {
        let err = handle_response(parse(json!({"data": [1, 2]}))).unwrap_err();
        assert_eq!(err.to_string(), ENVELOPE_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_success_without_data() {
        let err = handle_response(parse(json!({"success": true}))).unwrap_err();
        assert!(matches!(err, ApiError::MissingData));
        assert!(handle_empty_response(parse(json!({"success": true, "message": "Deleted"}))).is_ok());
    }

    #[test]
    fn test_null_data_is_missing() {
        let response: ApiResponse<Vec<u32>> =
            serde_json::from_value(json!({"success": true, "data": null})).unwrap();
        assert!(matches!(handle_response(response), Err(ApiError::MissingData)));
    }

    #[test]
    fn test_empty_response_failure() {
        let err = handle_empty_response(ApiResponse::<()>::failed("Not allowed")).unwrap_err();
        assert_eq!(err.to_string(), "Not allowed");
        assert_eq!(handle_response(ApiResponse::ok(7)).unwrap(), 7);
    }
}
