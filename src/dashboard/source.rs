//! Upstream data sources for dashboard resources.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{DashboardError, Result};

/// Something that can produce the current JSON for a named dashboard resource.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, resource: &str) -> Result<Value>;
}

// == REST Source ==
/// Fetches `GET {base_url}/{resource}` from the hosted backend's REST API.
#[derive(Debug, Clone)]
pub struct RestSource {
    client: reqwest::Client,
    base_url: String,
}

impl RestSource {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(key) = api_key {
            let invalid = |_: InvalidHeaderValue| {
                DashboardError::InvalidRequest("API key is not a valid header value".into())
            };
            headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid)?);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {key}")).map_err(invalid)?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Internal(format!("building HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.upstream_url.clone(),
            config.upstream_api_key.as_deref(),
            config.upstream_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl DataSource for RestSource {
    async fn fetch(&self, resource: &str) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!(%url, "fetching dashboard resource");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(%url, error = %e, "upstream request failed");
                DashboardError::from(e)
            })?;

        let body = response.json::<Value>().await.map_err(|e| {
            warn!(%url, error = %e, "upstream returned invalid JSON");
            DashboardError::Upstream(format!("invalid JSON from {url}: {e}"))
        })?;

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = RestSource::new("http://localhost:9/rest/v1/", None, Duration::from_secs(1))
            .unwrap();
        assert_eq!(source.base_url(), "http://localhost:9/rest/v1");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let result = RestSource::new("http://localhost:9", Some("bad\nkey"), Duration::from_secs(1));
        assert!(matches!(result, Err(DashboardError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_upstream_error() {
        // Port 9 (discard) is not expected to accept HTTP
        let source =
            RestSource::new("http://127.0.0.1:9", None, Duration::from_millis(500)).unwrap();
        let result = source.fetch("events").await;
        assert!(matches!(result, Err(DashboardError::Upstream(_))));
    }
}
