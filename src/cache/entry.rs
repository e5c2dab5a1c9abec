//! Cache Entry Module
//!
//! A stored value together with the instant it was stored and how long it stays fresh.

// == Cache Entry ==
/// A single cache entry with its freshness window.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value, never inspected by the cache
    pub value: V,
    /// Clock reading at insertion (milliseconds)
    pub stored_at: u64,
    /// Freshness window measured from `stored_at` (milliseconds)
    pub fresh_for: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub fn new(value: V, stored_at: u64, fresh_for: u64) -> Self {
        Self {
            value,
            stored_at,
            fresh_for,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was stored, as seen at `now`.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.stored_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry is still within its freshness window at `now`.
    ///
    /// The boundary counts as fresh: an entry aged exactly `fresh_for` is
    /// returned, one millisecond later it is stale.
    pub fn is_fresh(&self, now: u64) -> bool {
        self.age_ms(now) <= self.fresh_for
    }

    /// Negation of [`is_fresh`](Self::is_fresh).
    pub fn is_stale(&self, now: u64) -> bool {
        !self.is_fresh(now)
    }

    // == Remaining Freshness ==
    /// Milliseconds left before the entry goes stale, `0` once it has.
    pub fn fresh_remaining_ms(&self, now: u64) -> u64 {
        self.fresh_for.saturating_sub(self.age_ms(now))
    }
}
