//! Queue service facade wiring the engine and the reaper lifecycle.

use crate::config::QueueConfig;
use crate::dlq::DeadLetter;
use crate::engine::{QueueEngine, QueueStats};
use crate::error::{ConfigurationError, QueueError};
use crate::message::{DeliveredMessage, Message, MessageId, Timestamp};
use crate::reaper::{spawn_reaper, ReaperHandle};
use chrono::Duration;
use std::sync::Arc;

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;

/// Engine plus background reaper behind one external API
///
/// This is the surface a host process embeds: `enqueue`, `poll`, `ack`, and
/// lifecycle management. Hosts that want deterministic reaping can reach the
/// engine directly via [`QueueService::engine`].
pub struct QueueService {
    engine: Arc<QueueEngine>,
    reaper: ReaperHandle,
}

impl QueueService {
    /// Validate configuration, build the engine, and start the reaper
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: QueueConfig) -> Result<Self, ConfigurationError> {
        let reap_interval =
            config
                .reap_interval
                .to_std()
                .map_err(|_| ConfigurationError::Invalid {
                    message: "reap_interval must be positive".to_string(),
                })?;

        let engine = Arc::new(QueueEngine::new(config)?);
        let reaper = spawn_reaper(Arc::clone(&engine), reap_interval);

        Ok(Self { engine, reaper })
    }

    /// The engine behind the facade
    pub fn engine(&self) -> Arc<QueueEngine> {
        Arc::clone(&self.engine)
    }

    pub fn enqueue(&self, message: Message) {
        self.engine.enqueue(message);
    }

    pub fn enqueue_many(&self, messages: Vec<Message>) {
        self.engine.enqueue_many(messages);
    }

    pub fn poll(&self, batch_size: usize) -> Vec<DeliveredMessage> {
        self.engine.poll(batch_size)
    }

    pub fn ack(&self, id: &MessageId) -> Result<(), QueueError> {
        self.engine.ack(id)
    }

    pub fn nack(&self, id: &MessageId) -> Result<(), QueueError> {
        self.engine.nack(id)
    }

    pub fn extend_lease(&self, id: &MessageId, extra: Duration) -> Result<Timestamp, QueueError> {
        self.engine.extend_lease(id, extra)
    }

    pub fn stats(&self) -> QueueStats {
        self.engine.stats()
    }

    pub fn dead_letters(&self) -> Vec<DeadLetter> {
        self.engine.dead_letters()
    }

    /// Stop the reaper schedule
    ///
    /// Idempotent: calling it twice is a no-op. In-flight leases are neither
    /// drained nor discarded; a message still leased at shutdown stays
    /// leased until acked.
    pub async fn shutdown(&self) {
        self.reaper.stop().await;
    }
}
