//! API Handlers
//!
//! HTTP request handlers for each record endpoint. Handlers only translate
//! between HTTP and [`RecordService`] calls.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::CacheStats;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    DeleteResponse, HealthResponse, ListQuery, ListResponse, RecordRequest, StatsResponse,
};
use crate::records::{Record, RecordService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record service with its cache
    pub service: Arc<RecordService>,
    /// Collector the service's cache reports into
    pub stats: Arc<CacheStats>,
    /// Page size defaults and limits
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    ///
    /// `stats` must be the observer the service's cache was built with.
    pub fn new(service: RecordService, stats: Arc<CacheStats>, config: Config) -> Self {
        Self {
            service: Arc::new(service),
            stats,
            config: Arc::new(config),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the stats collector and the record service, whose cache starts
    /// its sweep on the current Tokio runtime.
    pub fn from_config(config: &Config) -> Self {
        let stats = Arc::new(CacheStats::new());
        let service = RecordService::from_config(config, stats.clone());
        Self::new(service, stats, config.clone())
    }
}

fn validated(req: &RecordRequest) -> Result<()> {
    match req.validate() {
        Some(error_msg) => Err(ApiError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

/// Handler for POST /records
pub async fn create_handler(
    State(state): State<AppState>,
    Json(req): Json<RecordRequest>,
) -> Result<(StatusCode, Json<Record>)> {
    validated(&req)?;

    let record = state.service.create_record(req.into());
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /records/:id
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Record>> {
    let record = state.service.get_record(id)?;
    Ok(Json(record))
}

/// Handler for GET /records?limit=&offset=
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ListResponse> {
    let (limit, offset) =
        query.window(state.config.default_page_limit, state.config.max_page_limit);

    let records = state.service.list_records(limit, offset);
    let total = state.service.count();

    Json(ListResponse::new(records, limit, offset, total))
}

/// Handler for PUT /records/:id
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<RecordRequest>,
) -> Result<Json<Record>> {
    validated(&req)?;

    let record = state.service.update_record(id, req.into())?;
    Ok(Json(record))
}

/// Handler for DELETE /records/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>> {
    state.service.delete_record(id)?;
    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.stats.snapshot(),
        state.service.cache().len(),
        state.service.count(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
