//! Cache Store Module
//!
//! Generic TTL cache: a `HashMap` behind a reader/writer lock, lazy eviction
//! on read, and an owned background sweep.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheObserver};
use crate::tasks::{spawn_sweep_task, Sweep, SweepHandle};

/// Sweep period used by [`TtlCache::new`].
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

// == Cache Core ==
/// State shared between the cache handle and its sweep task.
struct CacheCore<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    observer: Arc<dyn CacheObserver>,
}

impl<K: Hash + Eq, V> CacheCore<K, V> {
    fn purge(&self) -> usize {
        let removed = {
            let mut entries = self.entries.write();
            let before = entries.len();
            let now = Instant::now();
            entries.retain(|_, entry| !entry.is_expired_at(now));
            before - entries.len()
        };

        if removed > 0 {
            self.observer.on_evict(removed);
        }
        removed
    }
}

impl<K, V> Sweep for CacheCore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn purge_expired(&self) -> usize {
        self.purge()
    }
}

// == TTL Cache ==
/// Thread-safe key-value cache where every entry expires after a TTL.
///
/// Expired entries are removed lazily when a `get` runs into them, and in
/// bulk by a background sweep that is started by the constructor and
/// stopped by [`shutdown`](Self::shutdown) (or, without joining, on drop).
///
/// `get` works under the shared lock. Mutations, including the lazy
/// eviction inside `get`, take the exclusive lock. There is no capacity
/// bound.
pub struct TtlCache<K, V> {
    core: Arc<CacheCore<K, V>>,
    default_ttl: Duration,
    sweeper: Mutex<Option<SweepHandle>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache with the given default TTL and a 5 minute sweep.
    ///
    /// Must be called from within a Tokio runtime, which hosts the sweep task.
    pub fn new(default_ttl: Duration, observer: Arc<dyn CacheObserver>) -> Self {
        Self::with_sweep_interval(default_ttl, DEFAULT_SWEEP_INTERVAL, observer)
    }

    /// Creates a cache with an explicit sweep period.
    ///
    /// A zero period falls back to [`DEFAULT_SWEEP_INTERVAL`].
    /// Must be called from within a Tokio runtime, which hosts the sweep task.
    pub fn with_sweep_interval(
        default_ttl: Duration,
        sweep_interval: Duration,
        observer: Arc<dyn CacheObserver>,
    ) -> Self {
        let sweep_interval = if sweep_interval.is_zero() {
            warn!("Zero sweep interval, using {:?}", DEFAULT_SWEEP_INTERVAL);
            DEFAULT_SWEEP_INTERVAL
        } else {
            sweep_interval
        };
        let core = Arc::new(CacheCore {
            entries: RwLock::new(HashMap::new()),
            observer,
        });
        let sweeper = spawn_sweep_task(core.clone(), sweep_interval);

        Self {
            core,
            default_ttl,
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    // == Get ==
    /// Returns a clone of the live value stored under `key`.
    ///
    /// Reports a hit or a miss to the observer on every call. An expired
    /// entry counts as a miss and is removed on the way out. Reads never
    /// extend an entry's lifetime.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        // The read guard lives only for this statement.
        let lookup = self
            .core
            .entries
            .read()
            .get(key)
            .map(|entry| (!entry.is_expired()).then(|| entry.value.clone()));

        match lookup {
            None => {
                self.core.observer.on_miss();
                return None;
            }
            Some(Some(value)) => {
                self.core.observer.on_hit();
                return Some(value);
            }
            Some(None) => {}
        }

        // Expired under the read lock: re-check under the write lock, a
        // writer may have replaced the entry in between.
        let (live, evicted) = {
            let mut entries = self.core.entries.write();
            let live = entries
                .get(key)
                .filter(|entry| !entry.is_expired())
                .map(|entry| entry.value.clone());
            let evicted = live.is_none() && entries.remove(key).is_some();
            (live, evicted)
        };

        match live {
            Some(value) => {
                self.core.observer.on_hit();
                Some(value)
            }
            None => {
                if evicted {
                    self.core.observer.on_evict(1);
                }
                self.core.observer.on_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key` with the default TTL.
    pub fn set(&self, key: K, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// Any existing entry is replaced wholesale, expiry included.
    pub fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl);
        self.core.entries.write().insert(key, entry);
    }

    // == Delete ==
    /// Removes the entry for `key`. Returns whether an entry was present.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.entries.write().remove(key).is_some()
    }

    // == Contains ==
    /// Returns true if a live entry exists. Emits no events and evicts nothing.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core
            .entries
            .read()
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Time To Live ==
    /// Remaining lifetime of a live entry, `None` if absent or expired.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core
            .entries
            .read()
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.ttl_remaining())
    }

    // == Purge Expired ==
    /// Runs one sweep pass now. Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        self.core.purge()
    }

    // == Clear ==
    /// Drops every entry, live or not.
    pub fn clear(&self) {
        self.core.entries.write().clear();
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.core.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.entries.read().is_empty()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Shutdown ==
    /// Stops the sweep task and waits for it to finish.
    ///
    /// Safe to call more than once. The cache stays usable afterwards; only
    /// lazy eviction and [`purge_expired`](Self::purge_expired) remain.
    pub async fn shutdown(&self) {
        let sweeper = self.sweeper.lock().take();
        if let Some(sweeper) = sweeper {
            sweeper.stop().await;
            debug!("TTL cache sweep stopped");
        }
    }

    /// Returns true while the sweep task is attached and running.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .as_ref()
            .is_some_and(|sweeper| !sweeper.is_finished())
    }
}

impl<K, V> Drop for TtlCache<K, V> {
    fn drop(&mut self) {
        if let Some(sweeper) = self.sweeper.get_mut().take() {
            sweeper.signal();
        }
    }
}
