//! Error response DTOs.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// Body of every 4xx/5xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": "NOT_FOUND",
    "message": "vegetable with id 7 not found",
    "details": {"entity": "vegetable", "field": "id", "value": "7"},
    "request_id": "3f1c1a52-8f6e-4f5e-9c1b-2a7d5e0b9c44"
}))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }

    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "NOT_FOUND",
            &format!("{} with {} {} not found", entity, field, value),
        )
        .with_details(json!({
            "entity": entity,
            "field": field,
            "value": value,
        }))
    }

    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", &format!("Invalid {}: {}", field, reason))
            .with_details(json!({
                "field": field,
                "reason": reason,
            }))
    }

    /// Generic body for responses produced outside the handlers (router
    /// fallbacks, timeouts). An empty `message` falls back to the status
    /// reason phrase.
    pub fn from_status(status: StatusCode, message: &str) -> Self {
        let code = match status {
            StatusCode::BAD_REQUEST => "BAD_REQUEST",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
            StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
            StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
            StatusCode::REQUEST_TIMEOUT => "REQUEST_TIMEOUT",
            StatusCode::SERVICE_UNAVAILABLE => "SERVICE_UNAVAILABLE",
            s if s.is_server_error() => "INTERNAL_SERVER_ERROR",
            _ => "UNKNOWN_ERROR",
        };

        let message = if message.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error")
        } else {
            message
        };

        Self::new(code, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_skipped() {
        let body = serde_json::to_value(ErrorResponse::new("BAD_REQUEST", "nope")).unwrap();
        assert_eq!(body, json!({"code": "BAD_REQUEST", "message": "nope"}));
    }

    #[test]
    fn test_not_found_error_details() {
        let body = ErrorResponse::not_found_error("vegetable", "id", "7").with_request_id("req-1");
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.details.unwrap()["value"], "7");
        assert_eq!(body.request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_from_status_uses_reason_phrase() {
        let body = ErrorResponse::from_status(StatusCode::METHOD_NOT_ALLOWED, "");
        assert_eq!(body.code, "METHOD_NOT_ALLOWED");
        assert_eq!(body.message, "Method Not Allowed");

        let body = ErrorResponse::from_status(StatusCode::BAD_GATEWAY, "upstream");
        assert_eq!(body.code, "INTERNAL_SERVER_ERROR");
        assert_eq!(body.message, "upstream");
    }
}
