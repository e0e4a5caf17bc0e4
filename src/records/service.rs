//! Record Service Module
//!
//! Authoritative in-memory record store with a TTL cache in front of it.
//!
//! Reads are cache-aside: the cache is consulted first and filled from the
//! store on a miss. Creates write through to the cache; updates and deletes
//! invalidate the cached copy so the next read refills it. The store lock
//! and the cache lock are never held at the same time.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::cache::{CacheObserver, TtlCache};
use crate::config::Config;
use crate::error::RecordError;
use crate::records::{Record, RecordFields};

pub type Result<T> = std::result::Result<T, RecordError>;

// == Record Service ==
pub struct RecordService {
    /// Next identifier to hand out
    next_id: AtomicU64,
    /// Authoritative store
    records: RwLock<HashMap<u64, Record>>,
    /// Read cache over `records`
    cache: TtlCache<u64, Record>,
}

impl RecordService {
    // == Constructor ==
    /// Creates an empty service reading through `cache`.
    pub fn new(cache: TtlCache<u64, Record>) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            records: RwLock::new(HashMap::new()),
            cache,
        }
    }

    /// Creates an empty service with a cache built from configuration.
    ///
    /// Must be called from within a Tokio runtime (the cache spawns its sweep).
    pub fn from_config(config: &Config, observer: Arc<dyn CacheObserver>) -> Self {
        let cache = TtlCache::with_sweep_interval(
            config.default_ttl(),
            config.sweep_interval(),
            observer,
        );
        Self::new(cache)
    }

    // == Create ==
    /// Stores a new record under the next identifier and caches it.
    pub fn create_record(&self, fields: RecordFields) -> Record {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = Record::create(id, fields);

        self.records.write().insert(id, record.clone());
        self.fill_cache(&record);

        debug!("Created record {}", id);
        record
    }

    /// Caches `record`, then drops it again if the store no longer holds
    /// that exact value.
    ///
    /// The store is read a second time after the cache write: an update or
    /// delete that slipped in between the first read and the fill has
    /// already invalidated the cache, so its stale copy must not survive.
    fn fill_cache(&self, record: &Record) {
        self.cache.set(record.id, record.clone());

        let current = self.records.read().get(&record.id) == Some(record);
        if !current {
            self.cache.delete(&record.id);
            debug!("Dropped stale cache fill for record {}", record.id);
        }
    }

    // == Get ==
    /// Returns the record for `id`, from the cache when possible.
    ///
    /// A miss reads the store and fills the cache. An id absent from the
    /// store fails with `NotFound` and leaves nothing cached.
    pub fn get_record(&self, id: u64) -> Result<Record> {
        if let Some(record) = self.cache.get(&id) {
            return Ok(record);
        }

        let record = self
            .records
            .read()
            .get(&id)
            .cloned()
            .ok_or(RecordError::NotFound(id))?;

        self.fill_cache(&record);
        debug!("Cache filled for record {}", id);
        Ok(record)
    }

    // == List ==
    /// Returns up to `limit` records starting at `offset`.
    ///
    /// Reads the store directly. The store has no defined order, so pages are
    /// not stable across concurrent mutations.
    pub fn list_records(&self, limit: usize, offset: usize) -> Vec<Record> {
        let records = self.records.read();
        if offset >= records.len() {
            return Vec::new();
        }

        records
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    // == Update ==
    /// Replaces the attributes of an existing record, then drops its cached copy.
    pub fn update_record(&self, id: u64, fields: RecordFields) -> Result<Record> {
        let updated = {
            let mut records = self.records.write();
            let record = records.get_mut(&id).ok_or(RecordError::NotFound(id))?;
            record.apply(fields);
            record.clone()
        };

        self.cache.delete(&id);
        debug!("Updated record {}, cache invalidated", id);
        Ok(updated)
    }

    // == Delete ==
    /// Removes a record from the store, then drops its cached copy.
    ///
    /// The identifier is not handed out again.
    pub fn delete_record(&self, id: u64) -> Result<Record> {
        let removed = self
            .records
            .write()
            .remove(&id)
            .ok_or(RecordError::NotFound(id))?;

        self.cache.delete(&id);
        debug!("Deleted record {}, cache invalidated", id);
        Ok(removed)
    }

    /// Number of records in the authoritative store.
    pub fn count(&self) -> usize {
        self.records.read().len()
    }

    pub fn cache(&self) -> &TtlCache<u64, Record> {
        &self.cache
    }

    /// Stops the cache's background sweep.
    pub async fn shutdown(&self) {
        self.cache.shutdown().await;
    }
}
