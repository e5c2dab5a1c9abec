//! API Handlers
//!
//! HTTP request handlers for each dashboard endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::config::Config;
use crate::dashboard::{Dashboard, DataSource, RestSource};
use crate::error::{DashboardError, Result};
use crate::models::{
    validate_resource, FreshnessQuery, FreshnessResponse, HealthResponse, InvalidateResponse,
    RefreshResponse, SnapshotResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }

    /// Creates a new AppState from configuration, fetching from the configured REST upstream.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source: Arc<dyn DataSource> = Arc::new(RestSource::from_config(config)?);
        Ok(Self::new(Dashboard::from_config(config, source)))
    }
}

fn checked(resource: String) -> Result<String> {
    match validate_resource(&resource) {
        Some(error_msg) => Err(DashboardError::InvalidRequest(error_msg)),
        None => Ok(resource),
    }
}

/// Handler for GET /dashboard/:resource
///
/// Serves the cached copy while fresh, otherwise fetches it from upstream.
pub async fn load_handler(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(query): Query<FreshnessQuery>,
) -> Result<Json<SnapshotResponse>> {
    let resource = checked(resource)?;
    let snapshot = state.dashboard.load(&resource, query.fresh_for()).await?;

    Ok(Json(SnapshotResponse::new(resource, snapshot)))
}

/// Handler for GET /dashboard/:resource/freshness
pub async fn freshness_handler(
    State(state): State<AppState>,
    Path(resource): Path<String>,
) -> Result<Json<FreshnessResponse>> {
    let resource = checked(resource)?;
    let freshness = state.dashboard.freshness(&resource).await;

    Ok(Json(FreshnessResponse::new(resource, freshness)))
}

/// Handler for POST /dashboard/:resource/refresh
pub async fn refresh_handler(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(query): Query<FreshnessQuery>,
) -> Result<Json<RefreshResponse>> {
    let resource = checked(resource)?;
    let refreshed = state
        .dashboard
        .refresh_if_stale(&resource, query.fresh_for())
        .await?;

    Ok(Json(RefreshResponse {
        resource,
        refreshed,
    }))
}

/// Handler for DELETE /dashboard/:resource
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(resource): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    let resource = checked(resource)?;
    let removed = state.dashboard.invalidate(&resource).await;

    Ok(Json(InvalidateResponse::resource(resource, removed)))
}

/// Handler for DELETE /dashboard
pub async fn invalidate_all_handler(State(state): State<AppState>) -> Json<InvalidateResponse> {
    state.dashboard.invalidate_all().await;
    Json(InvalidateResponse::all())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.dashboard.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
