//! Cache Statistics Module
//!
//! Counters for reads and removals, exposed for dashboards and diagnostics.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// `get` calls that returned a value
    pub hits: u64,
    /// `get` calls that found nothing or found a stale entry
    pub misses: u64,
    /// Entries removed because a `get` or `has` found them stale
    pub stale_evictions: u64,
    /// Entries removed to stay within the capacity bound
    pub capacity_evictions: u64,
    /// Entries currently held, stale ones not yet observed included
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// hits / (hits + misses), or 0.0 before any `get`.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_stale_eviction(&mut self) {
        self.stale_evictions += 1;
    }

    pub fn record_capacity_eviction(&mut self) {
        self.capacity_evictions += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        let stats = CacheStats::new();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_eviction_counters_are_separate() {
        let mut stats = CacheStats::new();
        stats.record_stale_eviction();
        stats.record_stale_eviction();
        stats.record_capacity_eviction();

        assert_eq!(stats.stale_evictions, 2);
        assert_eq!(stats.capacity_evictions, 1);
        assert_eq!(stats.hits + stats.misses, 0);
    }

    #[test]
    fn test_serializes_counters() {
        let mut stats = CacheStats::new();
        stats.set_total_entries(4);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_entries"], 4);
        assert_eq!(json["stale_evictions"], 0);
    }
}
