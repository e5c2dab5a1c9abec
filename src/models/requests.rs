//! Request DTOs for the dashboard API
//!
//! Query parameters and path validation for incoming requests.

use std::time::Duration;

use serde::Deserialize;

/// Maximum allowed resource name length in bytes
pub const MAX_RESOURCE_LENGTH: usize = 256;

/// Query string accepted by the load and refresh endpoints.
///
/// `fresh_for_ms` overrides the default freshness window for the value stored
/// by this request. Negative values are clamped to zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FreshnessQuery {
    #[serde(default)]
    pub fresh_for_ms: Option<i64>,
}

impl FreshnessQuery {
    pub fn fresh_for(&self) -> Option<Duration> {
        self.fresh_for_ms
            .map(|ms| Duration::from_millis(ms.max(0).unsigned_abs()))
    }
}

/// Validates a dashboard resource name taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_resource(resource: &str) -> Option<String> {
    if resource.is_empty() {
        return Some("Resource name cannot be empty".to_string());
    }
    if resource.len() > MAX_RESOURCE_LENGTH {
        return Some(format!(
            "Resource name exceeds maximum length of {} bytes",
            MAX_RESOURCE_LENGTH
        ));
    }
    if !resource
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Some(format!(
            "Resource name '{}' may only contain letters, digits, '_' and '-'",
            resource
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_deserialize() {
        let query: FreshnessQuery = serde_json::from_str(r#"{"fresh_for_ms": 1500}"#).unwrap();
        assert_eq!(query.fresh_for(), Some(Duration::from_millis(1500)));

        let query: FreshnessQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.fresh_for(), None);
    }

    #[test]
    fn test_negative_window_clamped_to_zero() {
        let query = FreshnessQuery {
            fresh_for_ms: Some(-250),
        };
        assert_eq!(query.fresh_for(), Some(Duration::ZERO));
    }

    #[test]
    fn test_validate_resource() {
        assert!(validate_resource("events").is_none());
        assert!(validate_resource("donation-stats_2024").is_none());
        assert!(validate_resource("").is_some());
        assert!(validate_resource("../secrets").is_some());
        assert!(validate_resource("a b").is_some());
        assert!(validate_resource(&"x".repeat(MAX_RESOURCE_LENGTH)).is_none());
        assert!(validate_resource(&"x".repeat(MAX_RESOURCE_LENGTH + 1)).is_some());
    }
}
