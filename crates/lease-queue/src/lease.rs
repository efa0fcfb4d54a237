//! Visibility lease tracking for delivered messages.

use crate::message::{MessageId, QueuedMessage, Timestamp};
use chrono::Duration;
use std::collections::HashMap;

/// A message checked out to a consumer until a visibility deadline
#[derive(Debug, Clone)]
pub(crate) struct LeaseEntry {
    pub(crate) message: QueuedMessage,
    pub(crate) deadline: Timestamp,
}

impl LeaseEntry {
    pub(crate) fn is_expired(&self, now: &Timestamp) -> bool {
        self.deadline <= *now
    }
}

/// Active leases keyed by message id
///
/// Mutated only under the engine's state lock; the table itself does no
/// synchronization.
#[derive(Debug, Default)]
pub(crate) struct LeaseTable {
    entries: HashMap<MessageId, LeaseEntry>,
}

impl LeaseTable {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Record a delivery. Replaces any stale entry for the same id.
    pub(crate) fn insert(&mut self, message: QueuedMessage, deadline: Timestamp) {
        let id = message.id.clone();
        self.entries.insert(id, LeaseEntry { message, deadline });
    }

    pub(crate) fn remove(&mut self, id: &MessageId) -> Option<LeaseEntry> {
        self.entries.remove(id)
    }

    pub(crate) fn contains(&self, id: &MessageId) -> bool {
        self.entries.contains_key(id)
    }

    /// Push an active lease's deadline out by `extra`, returning the new
    /// deadline, or `None` when the id is not leased.
    pub(crate) fn extend(&mut self, id: &MessageId, extra: Duration) -> Option<Timestamp> {
        let entry = self.entries.get_mut(id)?;
        entry.deadline = Timestamp::from_datetime(entry.deadline.as_datetime() + extra);
        Some(entry.deadline.clone())
    }

    /// Remove and return every entry whose deadline has passed
    pub(crate) fn take_expired(&mut self, now: &Timestamp) -> Vec<LeaseEntry> {
        let expired_ids: Vec<MessageId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(id, _)| id.clone())
            .collect();

        expired_ids
            .iter()
            .filter_map(|id| self.entries.remove(id))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "lease_tests.rs"]
mod tests;
