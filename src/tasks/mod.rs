//! Background Tasks Module
//!
//! Contains background tasks owned by the cache.
//!
//! # Tasks
//! - TTL Sweep: removes expired cache entries at a fixed interval

mod sweep;

pub use sweep::{spawn_sweep_task, Sweep, SweepHandle};
