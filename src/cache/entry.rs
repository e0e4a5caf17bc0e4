//! Cache Entry Module
//!
//! Defines a single cache slot: an opaque value plus its absolute expiry instant.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// Liveness is never stored; it is recomputed against the clock on every
/// check so that reads and the sweep agree on the same definition.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Absolute expiry instant, None = the TTL runs past what `Instant` can represent
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` from now.
    ///
    /// A TTL too large to add to the clock (e.g. `Duration::MAX`) never expires.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current instant is
    /// greater than or equal to its expiry instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied instant.
    ///
    /// The sweep uses this to evaluate a whole batch against one `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, `Duration::ZERO` once expired and
    /// `Duration::MAX` for an entry that never expires.
    pub fn ttl_remaining(&self) -> Duration {
        match self.expires_at {
            Some(expires) => expires.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        }
    }
}
