//! Dashboard Service
//!
//! Serves dashboard resources from a [`StaleCache`], going to the upstream
//! source only when the cached copy is missing or stale.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStats, MonotonicClock, SharedClock, StaleCache};
use crate::config::Config;
use crate::dashboard::DataSource;
use crate::error::Result;

/// Cache type held by the dashboard.
pub type DashboardCache = StaleCache<Value, SharedClock>;

/// A resource as handed to a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub data: Value,
    /// Served from the cache rather than fetched for this call
    pub cached: bool,
    pub age: Duration,
}

/// Freshness of a cached resource, observed without evicting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freshness {
    pub present: bool,
    pub stale: bool,
    pub age: Option<Duration>,
}

// == Dashboard ==
/// Cached access to upstream dashboard resources.
///
/// The cache lock is never held while the upstream is being fetched.
pub struct Dashboard {
    cache: RwLock<DashboardCache>,
    source: Arc<dyn DataSource>,
}

impl Dashboard {
    pub fn new(cache: DashboardCache, source: Arc<dyn DataSource>) -> Self {
        Self {
            cache: RwLock::new(cache),
            source,
        }
    }

    /// Builds the dashboard on the process clock with the configured window and bound.
    pub fn from_config(config: &Config, source: Arc<dyn DataSource>) -> Self {
        let clock: SharedClock = Arc::new(MonotonicClock::new());
        let cache = StaleCache::with_clock(clock)
            .with_default_fresh_for(config.default_fresh_for())
            .with_max_entries(config.max_entries);
        Self::new(cache, source)
    }

    // == Load ==
    /// Returns the cached resource if fresh, otherwise fetches and caches it.
    ///
    /// `fresh_for` of `None` uses the cache default.
    pub async fn load(&self, resource: &str, fresh_for: Option<Duration>) -> Result<Snapshot> {
        {
            let mut cache = self.cache.write().await;
            if let Some(data) = cache.get(resource).cloned() {
                let age = cache.age(resource).unwrap_or_default();
                debug!(resource, age_ms = age.as_millis() as u64, "dashboard cache hit");
                return Ok(Snapshot {
                    data,
                    cached: true,
                    age,
                });
            }
        }

        let data = self.fetch_and_store(resource, fresh_for).await?;
        Ok(Snapshot {
            data,
            cached: false,
            age: Duration::ZERO,
        })
    }

    // == Freshness ==
    /// Reports presence, staleness and age of a resource without evicting it.
    pub async fn freshness(&self, resource: &str) -> Freshness {
        let cache = self.cache.read().await;
        let age = cache.age(resource);
        Freshness {
            present: age.is_some(),
            stale: cache.is_stale(resource),
            age,
        }
    }

    // == Refresh If Stale ==
    /// Refetches the resource when it is missing or stale. Until the new value
    /// arrives, the old one stays in the cache.
    ///
    /// Returns whether a fetch happened.
    pub async fn refresh_if_stale(
        &self,
        resource: &str,
        fresh_for: Option<Duration>,
    ) -> Result<bool> {
        if !self.cache.read().await.is_stale(resource) {
            return Ok(false);
        }
        self.fetch_and_store(resource, fresh_for).await?;
        Ok(true)
    }

    // == Invalidate ==
    /// Drops one cached resource. Returns whether it was cached.
    pub async fn invalidate(&self, resource: &str) -> bool {
        let removed = self.cache.write().await.delete(resource);
        if removed {
            info!(resource, "dashboard resource invalidated");
        }
        removed
    }

    pub async fn invalidate_all(&self) {
        self.cache.write().await.clear();
        info!("dashboard cache cleared");
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    async fn fetch_and_store(&self, resource: &str, fresh_for: Option<Duration>) -> Result<Value> {
        let data = self.source.fetch(resource).await?;
        self.cache
            .write()
            .await
            .set(resource, data.clone(), fresh_for);
        debug!(resource, "dashboard resource fetched and cached");
        Ok(data)
    }
}
