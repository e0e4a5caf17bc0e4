//! Cache Statistics Module
//!
//! Hit/miss/eviction reporting. The cache only emits events through the
//! [`CacheObserver`] trait; aggregating them is up to the injected collector.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Observer ==
/// Receives cache events. Injected into the cache at construction.
pub trait CacheObserver: Send + Sync {
    /// A `get` found a live entry.
    fn on_hit(&self);

    /// A `get` found nothing, or found an expired entry.
    fn on_miss(&self);

    /// `count` expired entries were removed, lazily or by the sweep.
    fn on_evict(&self, _count: usize) {}
}

// == No-op Observer ==
/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CacheObserver for NoopObserver {
    fn on_hit(&self) {}
    fn on_miss(&self) {}
}

// == Cache Stats ==
/// Counting collector for cache events.
///
/// Counters are atomics so the cache never has to take a lock to report.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// Point-in-time copy of [`CacheStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatsSnapshot {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key absent or expired)
    pub misses: u64,
    /// Number of expired entries removed
    pub evictions: u64,
    /// hits / (hits + misses), 0.0 before any lookup
    pub hit_rate: f64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of hits recorded so far.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of misses recorded so far.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of evicted entries recorded so far.
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits(), self.misses())
    }

    // == Snapshot ==
    pub fn snapshot(&self) -> StatsSnapshot {
        let hits = self.hits();
        let misses = self.misses();
        StatsSnapshot {
            hits,
            misses,
            evictions: self.evictions(),
            hit_rate: hit_rate(hits, misses),
        }
    }
}

impl CacheObserver for CacheStats {
    fn on_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn on_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn on_evict(&self, count: usize) {
        self.evictions.fetch_add(count as u64, Ordering::Relaxed);
    }
}

fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
