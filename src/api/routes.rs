//! API Routes
//!
//! Configures the Axum router with all dashboard endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    freshness_handler, health_handler, invalidate_all_handler, invalidate_handler, load_handler,
    refresh_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /dashboard/:resource` - Cached resource, fetched upstream when missing or stale
/// - `GET /dashboard/:resource/freshness` - Presence, staleness and age, without eviction
/// - `POST /dashboard/:resource/refresh` - Refetch only if stale
/// - `DELETE /dashboard/:resource` - Drop one cached resource
/// - `DELETE /dashboard` - Drop every cached resource
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/dashboard", delete(invalidate_all_handler))
        .route(
            "/dashboard/:resource",
            get(load_handler).delete(invalidate_handler),
        )
        .route("/dashboard/:resource/freshness", get(freshness_handler))
        .route("/dashboard/:resource/refresh", post(refresh_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, SharedClock, StaleCache};
    use crate::dashboard::{Dashboard, DataSource};
    use crate::error::{DashboardError, Result};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    struct DownSource;

    #[async_trait]
    impl DataSource for DownSource {
        async fn fetch(&self, _resource: &str) -> Result<Value> {
            Err(DashboardError::Upstream("connection refused".into()))
        }
    }

    fn create_test_app() -> Router {
        let clock: SharedClock = Arc::new(ManualClock::new());
        let dashboard = Dashboard::new(StaleCache::with_clock(clock), Arc::new(DownSource));
        create_router(AppState::new(dashboard))
    }

    async fn status_of(app: Router, method: &str, uri: &str) -> StatusCode {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of(create_test_app(), "GET", "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(status_of(create_test_app(), "GET", "/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        assert_eq!(
            status_of(create_test_app(), "GET", "/dashboard/events").await,
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_freshness_of_missing_resource() {
        assert_eq!(
            status_of(create_test_app(), "GET", "/dashboard/events/freshness").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_invalid_resource_is_bad_request() {
        assert_eq!(
            status_of(create_test_app(), "DELETE", "/dashboard/bad%20name").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_delete_all() {
        assert_eq!(status_of(create_test_app(), "DELETE", "/dashboard").await, StatusCode::OK);
    }
}
