//! # Lease Queue
//!
//! Single-process, in-memory message queue with at-least-once delivery.
//! Producers enqueue messages, consumers pull batches, and every delivered
//! message becomes invisible to other consumers for a visibility timeout. A
//! background reaper returns unacknowledged messages to the queue when their
//! lease expires, until a retry ceiling routes them to a dead-letter queue.
//!
//! This library provides:
//! - FIFO-best-effort enqueue/poll/ack with visibility leases
//! - Cumulative retry accounting with dead-letter routing
//! - A periodic lease reaper with cooperative shutdown
//! - Read-only dead-letter inspection and queue counters
//!
//! There is no persistence, transport, or replication; the crate is meant to
//! be embedded in a host process.
//!
//! ## Module Organization
//!
//! - [`config`] - Construction-time configuration and validation
//! - [`error`] - Error types for all queue operations
//! - [`message`] - Message structures and identifiers
//! - [`dlq`] - Dead-letter sink and entries
//! - [`engine`] - The serialized queue engine
//! - [`reaper`] - Background lease reclamation
//! - [`service`] - Facade wiring engine and reaper lifecycle
//!
//! ## Example
//!
//! ```rust
//! use lease_queue::{Message, QueueConfig, QueueEngine};
//!
//! let engine = QueueEngine::new(QueueConfig::default()).unwrap();
//! engine.enqueue(Message::new("first job".into()));
//!
//! let batch = engine.poll(10);
//! assert_eq!(batch.len(), 1);
//! assert_eq!(batch[0].attempt_count, 1);
//!
//! engine.ack(&batch[0].id).unwrap();
//! ```

// Module declarations
pub mod config;
pub mod dlq;
pub mod engine;
pub mod error;
mod lease;
pub mod message;
pub mod reaper;
pub mod service;

// Re-export commonly used types at crate root for convenience
pub use config::QueueConfig;
pub use dlq::{DeadLetter, DeadLetterSink};
pub use engine::{QueueEngine, QueueStats};
pub use error::{ConfigurationError, QueueError, ValidationError};
pub use message::{DeliveredMessage, Message, MessageId, Timestamp};
pub use reaper::{spawn_reaper, ReaperHandle};
pub use service::QueueService;
