//! Response DTOs for the record API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::StatsSnapshot;
use crate::records::Record;

/// Response body for GET /records
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    /// The requested page, in store order
    pub records: Vec<Record>,
    /// Number of records in this page
    pub count: usize,
    pub limit: usize,
    pub offset: usize,
    /// Number of records in the store
    pub total: usize,
}

impl ListResponse {
    pub fn new(records: Vec<Record>, limit: usize, offset: usize, total: usize) -> Self {
        Self {
            count: records.len(),
            records,
            limit,
            offset,
            total,
        }
    }
}

/// Response body for DELETE /records/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: u64,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(id: u64) -> Self {
        Self {
            message: format!("Record {} deleted successfully", id),
            id,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of expired entries evicted
    pub evictions: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Entries currently held by the cache
    pub cached_entries: usize,
    /// Records in the authoritative store
    pub total_records: usize,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a stats snapshot and current sizes
    pub fn new(snapshot: StatsSnapshot, cached_entries: usize, total_records: usize) -> Self {
        Self {
            hits: snapshot.hits,
            misses: snapshot.misses,
            evictions: snapshot.evictions,
            hit_rate: snapshot.hit_rate,
            cached_entries,
            total_records,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
