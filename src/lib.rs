//! Stale Cache - stale-aware in-memory caching for dashboard data
//!
//! [`StaleCache`] keeps each value for the freshness window it was stored with
//! and evicts lazily when a read finds it stale. The [`dashboard`] module uses it
//! to avoid redundant fetches from the hosted backend and serves the result over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{Clock, ManualClock, MonotonicClock, StaleCache};
pub use config::Config;
pub use dashboard::{Dashboard, DataSource, RestSource};
pub use error::DashboardError;
