//! Cache Module
//!
//! Stale-aware in-memory caching: per-entry freshness windows, lazy eviction
//! on read, and an optional LRU capacity bound.

mod clock;
mod entry;
mod lru;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use clock::{duration_to_ms, Clock, ManualClock, MonotonicClock, SharedClock};
pub use entry::CacheEntry;
pub use lru::RecencyOrder;
pub use stats::CacheStats;
pub use store::StaleCache;

// == Public Constants ==
/// Freshness window used when `set` is given none
pub const DEFAULT_FRESH_FOR: Duration = Duration::from_secs(5 * 60);
