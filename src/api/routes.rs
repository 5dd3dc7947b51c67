//! Router assembly: API routes, OpenAPI document and middleware stack.

use std::time::Duration;

use axum::{Router, http::StatusCode, middleware};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers::{health, vegetables};
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Builds the application router.
///
/// Layers run outermost first: CORS, request id, logging, error
/// normalization, timeout, then the handler.
///
/// # Routes
/// - `/api/hdataset` - Vegetable CRUD
/// - `/health`, `/health/ready`, `/health/live`
/// - `/swagger-ui`, `/api-docs/openapi.json`
pub fn create_router(state: AppState, request_timeout_secs: u64) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest(vegetables::BASE_PATH, vegetables::vegetable_routes())
        .merge(health::health_routes())
        .split_for_parts();

    let router = router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api));

    apply_layers(router, Duration::from_secs(request_timeout_secs)).with_state(state)
}

/// The timeout sits inside the error handler so an expired request still
/// gets a JSON 408 body with its request id.
fn apply_layers(router: Router<AppState>, request_timeout: Duration) -> Router<AppState> {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    use super::*;
    use crate::api::middleware::REQUEST_ID_HEADER;
    use crate::repositories::InMemoryVegetableStore;

    fn app() -> Router {
        create_router(
            AppState::from_store(Arc::new(InMemoryVegetableStore::new())),
            30,
        )
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_route_gets_json_not_found() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_wrong_method_gets_json_error() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/api/hdataset/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_json(response).await["code"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_slow_request_gets_json_timeout() {
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let app = apply_layers(slow, Duration::from_secs(1)).with_state(AppState::from_store(
            Arc::new(InMemoryVegetableStore::new()),
        ));

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let body = body_json(response).await;
        assert_eq!(body["code"], "REQUEST_TIMEOUT");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_openapi_document_lists_vegetable_paths() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.keys().any(|p| p.starts_with("/api/hdataset")));
        assert!(paths.contains_key("/api/hdataset/{id}"));
        assert!(paths.contains_key("/health"));
    }

    #[test]
    fn test_openapi_registers_tags() {
        let doc = ApiDoc::openapi();
        let tags: Vec<_> = doc
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert!(tags.contains(&"Vegetables".to_string()));
        assert!(tags.contains(&"Health".to_string()));
    }
}
