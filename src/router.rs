use crate::error::AppError;
use crate::handlers::{
    fallback_handler, health_handler, mcp_handler, ready_handler, version_handler,
};
use crate::state::AppState;
use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    routing::{get, post},
    BoxError, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the HTTP router. `/metrics` is only mounted when a Prometheus
/// recorder has been installed.
pub fn build_router(state: Arc<AppState>, prometheus: Option<PrometheusHandle>) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = Duration::from_secs(state.config.request_timeout_secs);

    let mut router = Router::new()
        // Protocol endpoint
        .route(
            "/mcp",
            post(mcp_handler).layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        // Discovery and health endpoints
        .route("/version", get(version_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler));

    if let Some(handle) = prometheus {
        router = router.route(
            "/metrics",
            get(move || {
                let handle = handle.clone();
                async move { handle.render() }
            }),
        );
    }

    router
        .fallback(fallback_handler)
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(request_timeout),
        )
        // State
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::Value;

    async fn render(err: BoxError) -> (StatusCode, Value) {
        let response = handle_middleware_error(err).await.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_elapsed_timeout_maps_to_408() {
        let (status, body) = render(Box::new(tower::timeout::error::Elapsed::new())).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["code"], 408);
        assert_eq!(body["error"], "Request timed out");
    }

    #[tokio::test]
    async fn test_other_middleware_errors_map_to_500() {
        let (status, body) = render("boom".into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], 500);
        assert!(body["error"].as_str().unwrap().contains("boom"));
    }
}
