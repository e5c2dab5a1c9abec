//! Request and Response models for the dashboard API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

pub use requests::{validate_resource, FreshnessQuery, MAX_RESOURCE_LENGTH};
pub use responses::{
    ErrorResponse, FreshnessResponse, HealthResponse, InvalidateResponse, RefreshResponse,
    SnapshotResponse, StatsResponse,
};
