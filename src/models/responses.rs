//! Response DTOs for the dashboard API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{duration_to_ms, CacheStats};
use crate::dashboard::{Freshness, Snapshot};

/// Response body for `GET /dashboard/:resource`
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotResponse {
    pub resource: String,
    pub data: Value,
    /// True when served from the cache
    pub cached: bool,
    pub age_ms: u64,
}

impl SnapshotResponse {
    pub fn new(resource: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            resource: resource.into(),
            data: snapshot.data,
            cached: snapshot.cached,
            age_ms: duration_to_ms(snapshot.age),
        }
    }
}

/// Response body for `GET /dashboard/:resource/freshness`
#[derive(Debug, Clone, Serialize)]
pub struct FreshnessResponse {
    pub resource: String,
    pub present: bool,
    pub stale: bool,
    /// Absent when nothing is cached
    pub age_ms: Option<u64>,
}

impl FreshnessResponse {
    pub fn new(resource: impl Into<String>, freshness: Freshness) -> Self {
        Self {
            resource: resource.into(),
            present: freshness.present,
            stale: freshness.stale,
            age_ms: freshness.age.map(duration_to_ms),
        }
    }
}

/// Response body for `POST /dashboard/:resource/refresh`
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub resource: String,
    /// Whether the upstream was contacted
    pub refreshed: bool,
}

/// Response body for the invalidation endpoints
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl InvalidateResponse {
    pub fn resource(resource: impl Into<String>, removed: bool) -> Self {
        let resource = resource.into();
        let message = if removed {
            format!("Resource '{}' invalidated", resource)
        } else {
            format!("Resource '{}' was not cached", resource)
        };
        Self {
            message,
            resource: Some(resource),
        }
    }

    pub fn all() -> Self {
        Self {
            message: "Dashboard cache cleared".to_string(),
            resource: None,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub stale_evictions: u64,
    pub capacity_evictions: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            stale_evictions: stats.stale_evictions,
            capacity_evictions: stats.capacity_evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
