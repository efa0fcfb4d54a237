//! The queue engine: ready buffer, lease table, and dead-letter routing.
//!
//! All mutation of the ready buffer and lease table happens under a single
//! lock. `poll` is a compound check-then-mutate that must not interleave
//! with an `ack` removing the same id or a `reap` requeuing it, so every
//! engine operation serializes on the same state.

use crate::config::QueueConfig;
use crate::dlq::{DeadLetter, DeadLetterSink};
use crate::error::{ConfigurationError, QueueError};
use crate::lease::LeaseTable;
use crate::message::{DeliveredMessage, Message, MessageId, QueuedMessage, Timestamp};
use chrono::Duration;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

/// Point-in-time counters for the three message stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    /// Messages eligible for delivery.
    pub ready: usize,
    /// Messages checked out under an active lease.
    pub leased: usize,
    /// Messages that exhausted their delivery budget.
    pub dead_lettered: usize,
}

/// Mutable queue state guarded by the engine lock
#[derive(Debug, Default)]
struct EngineState {
    /// FIFO buffer of messages eligible for delivery. Requeued messages
    /// re-enter at the back, not the front.
    ready: VecDeque<QueuedMessage>,
    leases: LeaseTable,
}

/// Single-queue, in-memory delivery engine
///
/// Plain constructible object; process-wide lifetime is the host's concern.
pub struct QueueEngine {
    config: QueueConfig,
    state: Mutex<EngineState>,
    dead_letters: DeadLetterSink,
}

impl QueueEngine {
    /// Build an engine after validating the configuration
    pub fn new(config: QueueConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        Ok(Self {
            config,
            state: Mutex::new(EngineState::default()),
            dead_letters: DeadLetterSink::new(),
        })
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().expect("queue state lock poisoned")
    }

    /// Append a message to the tail of the ready buffer
    ///
    /// Never fails; the buffer grows without bound.
    pub fn enqueue(&self, message: Message) {
        let mut state = self.state();
        state.ready.push_back(QueuedMessage::from_message(message));
    }

    /// Append a batch of messages in order
    pub fn enqueue_many(&self, messages: Vec<Message>) {
        let mut state = self.state();
        for message in messages {
            state.ready.push_back(QueuedMessage::from_message(message));
        }
    }

    /// Remove up to `batch_size` messages from the head of the ready buffer
    /// and lease them to the caller
    ///
    /// Each delivered message gets its attempt counter incremented and a
    /// fresh visibility deadline. A message whose delivery budget is already
    /// spent is routed to the dead-letter queue instead and does not consume
    /// a batch slot. Returns an empty batch when the buffer is empty.
    pub fn poll(&self, batch_size: usize) -> Vec<DeliveredMessage> {
        let mut state = self.state();
        let mut batch = Vec::new();

        while batch.len() < batch_size {
            let mut queued = match state.ready.pop_front() {
                Some(queued) => queued,
                None => break,
            };

            if queued.is_exhausted(self.config.max_retries) {
                self.dead_letters.add(queued);
                continue;
            }

            queued.attempt_count += 1;
            let delivered_at = Timestamp::now();
            let deadline = Timestamp::from_datetime(
                delivered_at.as_datetime() + self.config.visibility_timeout,
            );

            batch.push(DeliveredMessage {
                id: queued.id.clone(),
                body: queued.body.clone(),
                attributes: queued.attributes.clone(),
                attempt_count: queued.attempt_count,
                enqueued_at: queued.enqueued_at.clone(),
                delivered_at,
                leased_until: deadline.clone(),
            });

            state.leases.insert(queued, deadline);
        }

        batch
    }

    /// Acknowledge a delivered message, consuming it
    ///
    /// Fails with [`QueueError::UnknownLease`] when the id is not currently
    /// leased: already acked, already reaped back to the buffer, or never
    /// delivered.
    pub fn ack(&self, id: &MessageId) -> Result<(), QueueError> {
        let mut state = self.state();

        match state.leases.remove(id) {
            Some(_) => {
                debug!(message_id = %id, "Message acknowledged");
                Ok(())
            }
            None => Err(QueueError::UnknownLease {
                message_id: id.to_string(),
            }),
        }
    }

    /// Give up a lease early and return the message to the ready tail
    ///
    /// The attempt counter is kept, so a nacked message that already spent
    /// its delivery budget is dead-lettered by the next poll. Same
    /// [`QueueError::UnknownLease`] contract as [`QueueEngine::ack`].
    pub fn nack(&self, id: &MessageId) -> Result<(), QueueError> {
        let mut state = self.state();

        match state.leases.remove(id) {
            Some(entry) => {
                debug!(message_id = %id, "Message returned to ready buffer");
                state.ready.push_back(entry.message);
                Ok(())
            }
            None => Err(QueueError::UnknownLease {
                message_id: id.to_string(),
            }),
        }
    }

    /// Push an active lease's deadline out by `extra`, returning the new
    /// deadline
    pub fn extend_lease(&self, id: &MessageId, extra: Duration) -> Result<Timestamp, QueueError> {
        let mut state = self.state();

        state
            .leases
            .extend(id, extra)
            .ok_or_else(|| QueueError::UnknownLease {
                message_id: id.to_string(),
            })
    }

    /// Reclaim every lease whose deadline is at or before `now`
    ///
    /// Reclaimed messages re-enter the ready buffer at the tail with their
    /// attempt counter intact; the retry ceiling is cumulative across the
    /// message's lifetime. A reclaimed message whose budget is spent goes to
    /// the dead-letter queue instead and is not counted. Returns the number
    /// of messages returned to the buffer.
    ///
    /// Normally invoked by the background reaper; exposed for deterministic
    /// testing and for hosts that drive reaping themselves.
    pub fn reap(&self, now: Timestamp) -> usize {
        let mut state = self.state();
        let expired = state.leases.take_expired(&now);
        let mut reclaimed = 0;

        for entry in expired {
            if entry.message.is_exhausted(self.config.max_retries) {
                self.dead_letters.add(entry.message);
            } else {
                state.ready.push_back(entry.message);
                reclaimed += 1;
            }
        }

        if reclaimed > 0 {
            debug!(reclaimed, "Expired leases returned to ready buffer");
        }

        reclaimed
    }

    /// Counters for the ready buffer, lease table, and dead-letter queue
    pub fn stats(&self) -> QueueStats {
        let state = self.state();

        QueueStats {
            ready: state.ready.len(),
            leased: state.leases.len(),
            dead_lettered: self.dead_letters.len(),
        }
    }

    /// Snapshot of the dead-letter queue, oldest first
    pub fn dead_letters(&self) -> Vec<DeadLetter> {
        self.dead_letters.entries()
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }
}
