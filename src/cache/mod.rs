//! Cache Module
//!
//! Provides a generic in-memory cache with TTL expiration, lazy eviction and
//! a periodic background sweep.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::{CacheObserver, CacheStats, NoopObserver, StatsSnapshot};
pub use store::{TtlCache, DEFAULT_SWEEP_INTERVAL};
