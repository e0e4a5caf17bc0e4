//! Record Cache - a generic TTL cache with a cache-aside record service
//!
//! Provides a thread-safe in-memory cache with per-entry expiry, lazy
//! eviction and a background sweep, used as a read cache in front of a
//! keyed record store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::{CacheObserver, CacheStats, NoopObserver, TtlCache};
pub use config::Config;
pub use error::RecordError;
pub use records::{Record, RecordFields, RecordService};
