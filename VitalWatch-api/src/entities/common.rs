use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error response format for API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Create a validation error response
    pub fn validation_error(message: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            details,
            ..Self::new("validation_error", message)
        }
    }

    /// Create a bad request error response
    pub fn bad_request(message: &str) -> Self {
        Self::new("bad_request", message)
    }

    /// Report generation had no readings to work with
    pub fn insufficient_data(message: &str) -> Self {
        Self::new("insufficient_data", message)
    }

    /// The reading provider failed
    pub fn fetch_error(message: &str) -> Self {
        Self::new("fetch_error", message)
    }

    /// The configured provider does not support the operation
    pub fn not_supported(message: &str) -> Self {
        Self::new("not_supported", message)
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self::new("internal_error", "An unexpected error occurred")
    }

    /// HTTP status matching the error code
    pub fn status_code(&self) -> StatusCode {
        match self.error.as_str() {
            "insufficient_data" => StatusCode::NOT_FOUND,
            "validation_error" | "bad_request" => StatusCode::BAD_REQUEST,
            "not_supported" => StatusCode::METHOD_NOT_ALLOWED,
            "fetch_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorResponse::insufficient_data("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorResponse::fetch_error("x").status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(ErrorResponse::validation_error("x", None).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorResponse::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorResponse::not_supported("x").status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ErrorResponse::internal_error().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_details_are_omitted_when_empty() {
        let value = serde_json::to_value(ErrorResponse::bad_request("nope")).unwrap();
        assert_eq!(value["error"], "bad_request");
        assert_eq!(value["message"], "nope");
        assert!(value.get("details").is_none());
    }
}
