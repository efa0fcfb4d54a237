//! Terminal store for messages that exhausted their delivery budget.

use crate::message::{MessageId, QueuedMessage, Timestamp};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::warn;

/// A dead-lettered message with its final delivery bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadLetter {
    pub id: MessageId,
    #[serde(with = "crate::message::bytes_serde")]
    pub body: Bytes,
    pub attributes: HashMap<String, String>,
    /// Deliveries consumed before the message was routed here.
    pub attempt_count: u32,
    pub enqueued_at: Timestamp,
    pub dead_lettered_at: Timestamp,
}

/// Append-only sink for exhausted messages
///
/// Entries are immutable once inserted; there is no re-injection into the
/// ready buffer. The sink carries its own lock so the delivery hot path
/// only touches it when routing a message out of the cycle.
#[derive(Debug, Default)]
pub struct DeadLetterSink {
    entries: Mutex<Vec<DeadLetter>>,
}

impl DeadLetterSink {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn add(&self, queued: QueuedMessage) {
        let dead = DeadLetter {
            id: queued.id,
            body: queued.body,
            attributes: queued.attributes,
            attempt_count: queued.attempt_count,
            enqueued_at: queued.enqueued_at,
            dead_lettered_at: Timestamp::now(),
        };

        warn!(
            message_id = %dead.id,
            attempt_count = dead.attempt_count,
            "Message moved to dead-letter queue"
        );

        self.entries
            .lock()
            .expect("dead-letter sink lock poisoned")
            .push(dead);
    }

    /// Snapshot of the sink contents, oldest first
    pub fn entries(&self) -> Vec<DeadLetter> {
        self.entries
            .lock()
            .expect("dead-letter sink lock poisoned")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("dead-letter sink lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "dlq_tests.rs"]
mod tests;
