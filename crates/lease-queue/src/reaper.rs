//! Periodic reclamation of expired visibility leases.
//!
//! The reaper owns no queue state; it drives [`QueueEngine::reap`] on a
//! fixed cadence from a background tokio task and supports cooperative
//! shutdown. Once stopped, no further reap cycles run; an in-flight scan is
//! allowed to finish.

use crate::engine::QueueEngine;
use crate::message::Timestamp;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[cfg(test)]
#[path = "reaper_tests.rs"]
mod tests;

/// Handle to the background reaper task
///
/// Dropping the handle does not stop the task; call [`ReaperHandle::stop`].
pub struct ReaperHandle {
    shutdown: watch::Sender<bool>,
    task: tokio::sync::Mutex<Option<JoinHandle<()>>>,
}

/// Spawn the reaper on the current tokio runtime
///
/// The task invokes [`QueueEngine::reap`] once per `interval` until stopped.
pub fn spawn_reaper(engine: Arc<QueueEngine>, interval: Duration) -> ReaperHandle {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Reaper stopping");
                    break;
                }
                _ = ticker.tick() => {
                    let reclaimed = engine.reap(Timestamp::now());
                    if reclaimed > 0 {
                        debug!(reclaimed, "Reap cycle returned expired leases to ready buffer");
                    }
                }
            }
        }
    });

    ReaperHandle {
        shutdown: shutdown_tx,
        task: tokio::sync::Mutex::new(Some(task)),
    }
}

impl ReaperHandle {
    /// Stop the reap schedule and wait for the task to exit
    ///
    /// Idempotent: the second and later calls are no-ops.
    pub async fn stop(&self) {
        // The receiver is gone once the task has exited; nothing to signal.
        let _ = self.shutdown.send(true);

        if let Some(task) = self.task.lock().await.take() {
            if let Err(error) = task.await {
                warn!(%error, "Reaper task terminated abnormally");
            }
        }
    }
}
