//! Dashboard Module
//!
//! The cache's caller: dashboard resources fetched from the hosted backend and
//! kept in a [`StaleCache`](crate::cache::StaleCache) for their freshness window.

mod service;
mod source;

pub use service::{Dashboard, DashboardCache, Freshness, Snapshot};
pub use source::{DataSource, RestSource};
