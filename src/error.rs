//! Error types for the dashboard service
//!
//! Cache operations are total and never fail; these errors come from request
//! validation and the upstream backend.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Dashboard Error Enum ==
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Upstream has no such resource
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream backend failed or answered with garbage
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            let resource = err
                .url()
                .and_then(|url| url.path_segments()?.last().map(str::to_owned))
                .unwrap_or_default();
            return DashboardError::NotFound(resource);
        }
        DashboardError::Upstream(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            DashboardError::Upstream(_) => StatusCode::BAD_GATEWAY,
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
pub type Result<T> = std::result::Result<T, DashboardError>;
