//! Conversion of errors into JSON responses.
//!
//! Handlers return `AppError`, which maps to a status and an
//! [`ErrorResponse`]. The outer [`global_error_handler`] turns any remaining
//! non-JSON error (router 404/405, timeouts) into the same shape and stamps
//! every error body with the request id.

use axum::{
    Json,
    body::Body,
    extract::{
        Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Upper bound when buffering an error body for rewriting
const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = match &self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => ErrorResponse::not_found_error(entity, field, value),
            AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
            AppError::BadRequest { message } => ErrorResponse::new(error_to_code(&self), message),
            AppError::Database { operation, .. } => ErrorResponse::new(
                error_to_code(&self),
                &format!("Database operation failed: {}", operation),
            )
            .with_details(json!({ "operation": operation })),
            AppError::Configuration { key, .. } => ErrorResponse::new(
                error_to_code(&self),
                &format!("Configuration error: {}", key),
            ),
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new(error_to_code(&self), "Database connection unavailable")
            }
            AppError::Internal { .. } => {
                ErrorResponse::new(error_to_code(&self), "An internal error occurred")
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Normalizes every 4xx/5xx response to an [`ErrorResponse`] carrying the
/// request id.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());
    let response = next.run(request).await;

    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    let (mut parts, body) = response.into_parts();
    let (bytes, buffered) = match axum::body::to_bytes(body, MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => (bytes, true),
        Err(e) => {
            tracing::warn!(
                status = %status,
                limit = MAX_ERROR_BODY_BYTES,
                error = %e,
                "Failed to buffer error body, replacing it with a generic message"
            );
            (Default::default(), false)
        }
    };

    let mut error_response = if is_json && buffered {
        match serde_json::from_slice::<ErrorResponse>(&bytes) {
            Ok(parsed) => parsed,
            // Some other JSON document, e.g. an unhealthy health report
            Err(_) => return Response::from_parts(parts, Body::from(bytes)),
        }
    } else {
        ErrorResponse::from_status(status, String::from_utf8_lossy(&bytes).trim())
    };

    if error_response.request_id.is_none()
        && let Some(id) = &request_id
    {
        error_response = error_response.with_request_id(id);
    }

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::CONTENT_TYPE);
    (parts, Json(error_response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, middleware, routing::get};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_and_code_mapping() {
        let cases = [
            (AppError::vegetable_not_found(1), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                AppError::Validation {
                    field: "name".to_string(),
                    reason: "required".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                AppError::BadRequest {
                    message: "mismatch".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
            ),
            (
                AppError::Database {
                    operation: "insert".to_string(),
                    source: anyhow::anyhow!("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
            ),
            (
                AppError::Configuration {
                    key: "database.url".to_string(),
                    source: anyhow::anyhow!("missing"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
            ),
            (
                AppError::ConnectionPool {
                    source: anyhow::anyhow!("timed out"),
                },
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
            ),
            (
                AppError::Internal {
                    source: anyhow::anyhow!("panic"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            assert_eq!(error_to_status_code(&error), status, "{:?}", error);
            assert_eq!(error_to_code(&error), code, "{:?}", error);
        }
    }

    #[tokio::test]
    async fn test_database_source_is_not_exposed() {
        let response = AppError::Database {
            operation: "update vegetable".to_string(),
            source: anyhow::anyhow!("password=hunter2"),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "DATABASE_ERROR");
        assert!(!body.to_string().contains("hunter2"));
    }

    #[test]
    fn test_json_rejection_becomes_bad_request() {
        use axum::extract::rejection::MissingJsonContentType;

        let error: AppError = JsonRejection::MissingJsonContentType(MissingJsonContentType::default()).into();
        assert!(matches!(error, AppError::BadRequest { .. }));
        assert_eq!(error_to_status_code(&error), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_global_handler_wraps_plain_text_errors() {
        let app = Router::new()
            .route(
                "/teapot",
                get(|| async { (StatusCode::BAD_REQUEST, "plain text failure") }),
            )
            .layer(middleware::from_fn(global_error_handler));

        let response = app
            .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["message"], "plain text failure");
    }

    #[tokio::test]
    async fn test_global_handler_adds_request_id_to_json_errors() {
        let app = Router::new()
            .route(
                "/missing",
                get(|| async { AppError::vegetable_not_found(5) }),
            )
            .layer(middleware::from_fn(global_error_handler))
            .layer(middleware::from_fn(super::super::request_id_middleware));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/missing")
                    .header(super::super::REQUEST_ID_HEADER, "req-77")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["request_id"], "req-77");
        assert_eq!(body["details"]["value"], "5");
    }

    #[tokio::test]
    async fn test_global_handler_replaces_oversized_error_body() {
        let app = Router::new()
            .route(
                "/huge",
                get(|| async {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "x".repeat(MAX_ERROR_BODY_BYTES + 1),
                    )
                }),
            )
            .layer(middleware::from_fn(global_error_handler));

        let response = app
            .oneshot(Request::builder().uri("/huge").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["message"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_global_handler_passes_success_through() {
        let app = Router::new()
            .route("/ok", get(|| async { "fine" }))
            .layer(middleware::from_fn(global_error_handler));

        let response = app
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
