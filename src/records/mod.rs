//! Records Module
//!
//! Keyed record store fronted by the TTL cache.

mod record;
mod service;

pub use record::{Record, RecordFields};
pub use service::RecordService;
