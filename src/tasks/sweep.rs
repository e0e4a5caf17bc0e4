//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries,
//! independent of whether anyone reads them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Something the sweep task can purge.
pub trait Sweep: Send + Sync + 'static {
    /// Removes every expired entry and returns how many were removed.
    fn purge_expired(&self) -> usize;
}

/// Owner side of a running sweep task.
///
/// Stopping is signal-and-join: [`stop`](Self::stop) raises the stop flag
/// and waits for the task to return.
#[derive(Debug)]
pub struct SweepHandle {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SweepHandle {
    /// Raises the stop flag without waiting for the task.
    pub fn signal(&self) {
        // No receiver means the task already returned.
        let _ = self.stop.send(true);
    }

    /// Raises the stop flag and waits for the task to finish.
    pub async fn stop(self) {
        self.signal();
        if let Err(err) = self.handle.await {
            warn!("TTL sweep task ended abnormally: {}", err);
        }
    }

    /// Returns true once the task has returned.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns a background task that periodically purges expired entries.
///
/// The first pass runs one full `interval` after spawning. Must be called
/// from within a Tokio runtime.
///
/// # Example
/// ```ignore
/// let handle = spawn_sweep_task(core.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// handle.stop().await;
/// ```
pub fn spawn_sweep_task<S: Sweep>(target: Arc<S>, interval: Duration) -> SweepHandle {
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", interval);

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    let removed = target.purge_expired();

                    if removed > 0 {
                        info!("TTL sweep: removed {} expired entries", removed);
                    } else {
                        debug!("TTL sweep: no expired entries found");
                    }
                }
                changed = stop_rx.changed() => {
                    // Err means the handle was dropped without signalling.
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("TTL sweep task stopped");
    });

    SweepHandle {
        stop: stop_tx,
        handle,
    }
}
