//! Cache Store Module
//!
//! Key/value map whose entries each carry their own freshness window. Staleness
//! is only discovered when a key is accessed; nothing sweeps the map.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{
    duration_to_ms, CacheEntry, CacheStats, Clock, MonotonicClock, RecencyOrder,
    DEFAULT_FRESH_FOR,
};

// == Stale Cache ==
/// In-memory cache that never hands back a value older than the window it was stored with.
///
/// `get` and `has` remove an entry they find stale. `age` and `is_stale` only
/// look, so a caller can decide to refetch while the old value is still held.
///
/// All methods complete immediately. Share one instance across threads behind
/// a single lock.
#[derive(Debug)]
pub struct StaleCache<V, C = MonotonicClock> {
    entries: HashMap<String, CacheEntry<V>>,
    /// Only maintained when `max_entries` is set
    recency: RecencyOrder,
    stats: CacheStats,
    clock: C,
    /// Window used by `set` when the caller passes `None` (milliseconds)
    default_fresh_for: u64,
    max_entries: Option<usize>,
}

impl<V> StaleCache<V, MonotonicClock> {
    /// Creates an unbounded cache on the process clock with the 5 minute default window.
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl<V> Default for StaleCache<V, MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C: Clock> StaleCache<V, C> {
    // == Constructors ==
    /// Creates an unbounded cache reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyOrder::new(),
            stats: CacheStats::new(),
            clock,
            default_fresh_for: duration_to_ms(DEFAULT_FRESH_FOR),
            max_entries: None,
        }
    }

    /// Sets the window applied when `set` is called without one.
    pub fn with_default_fresh_for(mut self, fresh_for: Duration) -> Self {
        self.default_fresh_for = duration_to_ms(fresh_for);
        self
    }

    /// Bounds the number of entries; the least recently used one makes room for a new key.
    ///
    /// `None` and `Some(0)` both mean unbounded.
    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries.filter(|&n| n > 0);
        if self.max_entries.is_some() {
            for key in self.entries.keys() {
                self.recency.touch(key);
            }
        }
        self
    }

    pub fn default_fresh_for(&self) -> Duration {
        Duration::from_millis(self.default_fresh_for)
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry along with its
    /// timestamp and window.
    ///
    /// `fresh_for` of `None` uses the cache default.
    pub fn set(&mut self, key: impl Into<String>, value: V, fresh_for: Option<Duration>) {
        let key = key.into();
        let now = self.clock.now_ms();
        let fresh_for = fresh_for.map_or(self.default_fresh_for, duration_to_ms);

        if let Some(max) = self.max_entries {
            if !self.entries.contains_key(&key) && self.entries.len() >= max {
                self.evict_least_recent();
            }
            self.recency.touch(&key);
        }

        self.entries.insert(key, CacheEntry::new(value, now, fresh_for));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value for `key` if it is still fresh.
    ///
    /// A stale entry is removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = self.clock.now_ms();

        match self.entries.get(key).map(|entry| entry.is_fresh(now)) {
            Some(true) => {
                self.stats.record_hit();
                if self.max_entries.is_some() {
                    self.recency.touch(key);
                }
                self.entries.get(key).map(|entry| &entry.value)
            }
            Some(false) => {
                self.remove_stale(key, now);
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Has ==
    /// Same freshness test and eviction as [`get`](Self::get), without the value.
    ///
    /// Does not count as a hit or miss and does not refresh recency.
    pub fn has(&mut self, key: &str) -> bool {
        let now = self.clock.now_ms();

        match self.entries.get(key).map(|entry| entry.is_fresh(now)) {
            Some(true) => true,
            Some(false) => {
                self.remove_stale(key, now);
                false
            }
            None => false,
        }
    }

    // == Delete ==
    /// Removes `key` whatever its state. Returns whether an entry was there.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.recency.forget(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
        self.stats.set_total_entries(0);
    }

    // == Age ==
    /// Time since `key` was stored, fresh or not. Never evicts.
    pub fn age(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .map(|entry| Duration::from_millis(entry.age_ms(now)))
    }

    // == Is Stale ==
    /// Whether `key` is missing or past its window. Never evicts.
    pub fn is_stale(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .map_or(true, |entry| entry.is_stale(now))
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of held entries, including stale ones nobody has read yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_stale(&mut self, key: &str, now: u64) {
        if let Some(entry) = self.entries.remove(key) {
            debug!(
                key,
                age_ms = entry.age_ms(now),
                fresh_for_ms = entry.fresh_for,
                "evicted stale cache entry"
            );
            self.recency.forget(key);
            self.stats.record_stale_eviction();
            self.stats.set_total_entries(self.entries.len());
        }
    }

    fn evict_least_recent(&mut self) {
        while let Some(key) = self.recency.pop_least_recent() {
            if self.entries.remove(&key).is_some() {
                debug!(key = %key, "evicted least recently used cache entry");
                self.stats.record_capacity_eviction();
                return;
            }
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::{json, Value};

    fn cache_with_clock() -> (StaleCache<Value, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (StaleCache::with_clock(clock.clone()), clock)
    }

    fn ms(n: u64) -> Option<Duration> {
        Some(Duration::from_millis(n))
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache: StaleCache<String> = StaleCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.default_fresh_for(), Duration::from_secs(300));
        assert_eq!(cache.max_entries(), None);
    }

    #[test]
    fn test_get_missing_is_absent() {
        let (mut cache, _) = cache_with_clock();
        assert_eq!(cache.get("events"), None);
        assert!(!cache.has("events"));
    }

    #[test]
    fn test_stats_scenario() {
        let (mut cache, clock) = cache_with_clock();

        cache.set("stats", json!({"count": 5}), ms(1000));
        assert_eq!(cache.get("stats"), Some(&json!({"count": 5})));

        clock.advance_ms(1001);
        assert_eq!(cache.get("stats"), None);
        assert!(!cache.has("stats"));
    }

    #[test]
    fn test_freshness_boundary_is_inclusive() {
        let (mut cache, clock) = cache_with_clock();
        cache.set("banners", json!([1, 2]), ms(500));

        clock.advance_ms(500);
        assert_eq!(cache.get("banners"), Some(&json!([1, 2])));

        clock.advance_ms(1);
        assert_eq!(cache.get("banners"), None);
    }

    #[test]
    fn test_zero_window_fresh_only_at_store_instant() {
        let (mut cache, clock) = cache_with_clock();
        cache.set("x", json!(1), ms(0));

        assert_eq!(cache.get("x"), Some(&json!(1)));

        clock.advance_ms(1);
        assert_eq!(cache.get("x"), None);
    }

    #[test]
    fn test_default_window_applies_when_none() {
        let clock = ManualClock::new();
        let mut cache: StaleCache<i32, _> = StaleCache::with_clock(clock.clone())
            .with_default_fresh_for(Duration::from_millis(200));

        cache.set("k", 1, None);
        clock.advance_ms(200);
        assert!(cache.has("k"));
        clock.advance_ms(1);
        assert!(!cache.has("k"));
    }

    #[test]
    fn test_get_evicts_stale_entry() {
        let (mut cache, clock) = cache_with_clock();
        cache.set("gallery", json!("photos"), ms(100));
        clock.advance_ms(150);

        assert_eq!(cache.get("gallery"), None);
        assert!(!cache.has("gallery"));
        assert_eq!(cache.age("gallery"), None);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().stale_evictions, 1);
    }

    #[test]
    fn test_has_evicts_stale_entry() {
        let (mut cache, clock) = cache_with_clock();
        cache.set("donations", json!(10), ms(100));
        clock.advance_ms(101);

        assert!(!cache.has("donations"));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.age("donations"), None);
    }

    #[test]
    fn test_has_then_get_agree() {
        let (mut cache, clock) = cache_with_clock();
        cache.set("events", json!(["picnic"]), ms(100));
        clock.advance_ms(100);

        assert!(cache.has("events"));
        assert_eq!(cache.get("events"), Some(&json!(["picnic"])));
    }

    #[test]
    fn test_inspection_does_not_evict() {
        let (mut cache, clock) = cache_with_clock();
        cache.set("announcements", json!("hello"), ms(100));
        clock.advance_ms(250);

        for _ in 0..3 {
            assert!(cache.is_stale("announcements"));
            assert_eq!(cache.age("announcements"), Some(Duration::from_millis(250)));
        }
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().stale_evictions, 0);

        // Only the destructive read removes it
        assert_eq!(cache.get("announcements"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_is_stale_on_missing_and_fresh() {
        let (mut cache, _) = cache_with_clock();
        assert!(cache.is_stale("missing"));

        cache.set("fresh", json!(true), ms(1000));
        assert!(!cache.is_stale("fresh"));
        assert_eq!(cache.age("fresh"), Some(Duration::ZERO));
    }

    #[test]
    fn test_overwrite_resets_freshness() {
        let (mut cache, clock) = cache_with_clock();

        cache.set("k", json!("v1"), ms(100));
        clock.advance_ms(50);
        cache.set("k", json!("v2"), ms(100));
        clock.advance_ms(80);

        assert_eq!(cache.age("k"), Some(Duration::from_millis(80)));
        assert_eq!(cache.get("k"), Some(&json!("v2")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_overwrite_replaces_window() {
        let (mut cache, clock) = cache_with_clock();

        cache.set("k", json!(1), ms(10_000));
        cache.set("k", json!(2), ms(10));
        clock.advance_ms(11);

        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_delete_and_clear_are_idempotent() {
        let (mut cache, _) = cache_with_clock();

        assert!(!cache.delete("missing"));
        cache.clear();
        assert!(cache.is_empty());

        cache.set("a", json!(1), None);
        cache.set("b", json!(2), None);
        assert!(cache.delete("a"));
        assert!(!cache.delete("a"));
        assert_eq!(cache.get("b"), Some(&json!(2)));

        cache.clear();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().total_entries, 0);
    }

    #[test]
    fn test_delete_removes_stale_entry() {
        let (mut cache, clock) = cache_with_clock();
        cache.set("k", json!(1), ms(1));
        clock.advance_ms(5);

        assert!(cache.delete("k"));
        assert_eq!(cache.stats().stale_evictions, 0);
    }

    #[test]
    fn test_keys_are_independent() {
        let (mut cache, clock) = cache_with_clock();
        cache.set("a", json!("short"), ms(10));
        cache.set("b", json!("long"), ms(1000));
        clock.advance_ms(20);

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(&json!("long")));
        assert_eq!(cache.age("b"), Some(Duration::from_millis(20)));

        cache.delete("b");
        cache.set("a", json!("again"), ms(10));
        assert!(!cache.has("b"));
        assert!(cache.has("a"));
    }

    #[test]
    fn test_stats_count_get_only() {
        let (mut cache, clock) = cache_with_clock();
        cache.set("a", json!(1), ms(10));

        cache.get("a");
        cache.get("missing");
        cache.has("a");
        cache.has("missing");
        clock.advance_ms(11);
        cache.get("a");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.stale_evictions, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_unbounded_by_default() {
        let (mut cache, _) = cache_with_clock();
        for i in 0..5_000 {
            cache.set(format!("key{i}"), json!(i), None);
        }
        assert_eq!(cache.len(), 5_000);
        assert_eq!(cache.stats().capacity_evictions, 0);
    }

    #[test]
    fn test_capacity_bound_evicts_least_recent() {
        let clock = ManualClock::new();
        let mut cache: StaleCache<i32, _> =
            StaleCache::with_clock(clock).with_max_entries(Some(3));

        cache.set("a", 1, None);
        cache.set("b", 2, None);
        cache.set("c", 3, None);
        // Reading "a" makes "b" the least recently used
        assert_eq!(cache.get("a"), Some(&1));
        cache.set("d", 4, None);

        assert_eq!(cache.len(), 3);
        assert!(!cache.has("b"));
        assert!(cache.has("a"));
        assert!(cache.has("d"));
        assert_eq!(cache.stats().capacity_evictions, 1);
    }

    #[test]
    fn test_capacity_overwrite_does_not_evict() {
        let mut cache: StaleCache<i32, _> =
            StaleCache::with_clock(ManualClock::new()).with_max_entries(Some(2));

        cache.set("a", 1, None);
        cache.set("b", 2, None);
        cache.set("a", 10, None);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), Some(&10));
        assert_eq!(cache.get("b"), Some(&2));
    }

    #[test]
    fn test_zero_max_entries_means_unbounded() {
        let cache: StaleCache<i32, _> =
            StaleCache::with_clock(ManualClock::new()).with_max_entries(Some(0));
        assert_eq!(cache.max_entries(), None);
    }
}
