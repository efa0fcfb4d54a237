//! Message types and core domain identifiers.

use crate::error::ValidationError;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

// ============================================================================
// Core Domain Identifiers
// ============================================================================

/// Unique identifier for messages within the queue
///
/// Producers may assign their own ids; [`MessageId::new`] generates a random
/// one. The id is the handle used for acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Generate new random message ID
    pub fn new() -> Self {
        let id = uuid::Uuid::new_v4();
        Self(id.to_string())
    }

    /// Get message ID as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MessageId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "message_id".to_string(),
            });
        }

        Ok(Self(s.to_string()))
    }
}

/// Timestamp wrapper for consistent time handling
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create timestamp for current time
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create timestamp from DateTime
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get underlying DateTime
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dt = s.parse::<DateTime<Utc>>()?;
        Ok(Self::from_datetime(dt))
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// A message handed to the queue by a producer
///
/// The body and attributes are opaque to the engine; nothing in the delivery
/// cycle inspects them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    #[serde(with = "bytes_serde")]
    pub body: Bytes,
    pub attributes: HashMap<String, String>,
}

/// Custom serialization for Bytes
pub(crate) mod bytes_serde {
    use base64::{engine::general_purpose, Engine as _};
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = general_purpose::STANDARD.encode(bytes);
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let decoded = general_purpose::STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)?;
        Ok(Bytes::from(decoded))
    }
}

impl Message {
    /// Create new message with body and a generated id
    pub fn new(body: Bytes) -> Self {
        Self {
            id: MessageId::new(),
            body,
            attributes: HashMap::new(),
        }
    }

    /// Replace the generated id with a producer-assigned one
    pub fn with_id(mut self, id: MessageId) -> Self {
        self.id = id;
        self
    }

    /// Add message attribute
    pub fn with_attribute(mut self, key: String, value: String) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

/// A message received from the queue with delivery metadata
#[derive(Debug, Clone)]
pub struct DeliveredMessage {
    pub id: MessageId,
    pub body: Bytes,
    pub attributes: HashMap<String, String>,
    /// Total deliveries so far, this one included.
    pub attempt_count: u32,
    pub enqueued_at: Timestamp,
    pub delivered_at: Timestamp,
    /// Instant the visibility lease expires unless acked or extended.
    pub leased_until: Timestamp,
}

impl DeliveredMessage {
    /// Convert back to Message (for forwarding/replaying)
    pub fn message(&self) -> Message {
        Message {
            id: self.id.clone(),
            body: self.body.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

// ============================================================================
// Internal Storage Representation
// ============================================================================

/// A message held inside the engine with delivery bookkeeping
///
/// `attempt_count` is incremented exactly once per delivery, never on
/// enqueue and never when the reaper returns the message to the buffer.
#[derive(Debug, Clone)]
pub(crate) struct QueuedMessage {
    pub(crate) id: MessageId,
    pub(crate) body: Bytes,
    pub(crate) attributes: HashMap<String, String>,
    pub(crate) attempt_count: u32,
    pub(crate) enqueued_at: Timestamp,
}

impl QueuedMessage {
    pub(crate) fn from_message(message: Message) -> Self {
        Self {
            id: message.id,
            body: message.body,
            attributes: message.attributes,
            attempt_count: 0,
            enqueued_at: Timestamp::now(),
        }
    }

    /// True once the full delivery budget of `max_retries + 1` is spent.
    pub(crate) fn is_exhausted(&self, max_retries: u32) -> bool {
        self.attempt_count > max_retries
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
