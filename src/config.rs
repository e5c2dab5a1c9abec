//! Configuration Module
//!
//! Loads service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_FRESH_FOR;

/// Service configuration. Every value has a default and an environment override.
#[derive(Debug, Clone)]
pub struct Config {
    /// Freshness window for cached resources when a request names none (milliseconds)
    pub default_fresh_for_ms: u64,
    /// Optional capacity bound on cached resources; `None` is unbounded
    pub max_entries: Option<usize>,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the hosted backend REST API
    pub upstream_url: String,
    /// Key sent to the backend as `apikey` and bearer token
    pub upstream_api_key: Option<String>,
    /// Per-request timeout for upstream calls in seconds
    pub upstream_timeout_secs: u64,
}

const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:54321/rest/v1";

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_FRESH_FOR_MS` - Default freshness window (default: 300000)
    /// - `MAX_ENTRIES` - Capacity bound, `0` for none (default: none)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_URL` - Backend REST base URL (default: local dev backend)
    /// - `UPSTREAM_API_KEY` - Backend key (default: none)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream request timeout (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            default_fresh_for_ms: parse_var("DEFAULT_FRESH_FOR_MS")
                .unwrap_or(defaults.default_fresh_for_ms),
            max_entries: parse_var::<usize>("MAX_ENTRIES")
                .map_or(defaults.max_entries, |n| (n > 0).then_some(n)),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_url: non_empty_var("UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            upstream_api_key: non_empty_var("UPSTREAM_API_KEY"),
            upstream_timeout_secs: parse_var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or(defaults.upstream_timeout_secs),
        }
    }

    pub fn default_fresh_for(&self) -> Duration {
        Duration::from_millis(self.default_fresh_for_ms)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_fresh_for_ms: DEFAULT_FRESH_FOR.as_millis() as u64,
            max_entries: None,
            server_port: 3000,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_api_key: None,
            upstream_timeout_secs: 10,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
