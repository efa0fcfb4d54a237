//! Error types for queue operations.

use thiserror::Error;

/// Errors surfaced by queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    /// An ack, nack, or lease extension referenced a message that is not
    /// currently leased. A late or duplicate ack signals a client bug or a
    /// race the caller should observe, so this is never swallowed.
    #[error("No active lease for message: {message_id}")]
    UnknownLease { message_id: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl QueueError {
    /// Check if error is transient and should be retried
    pub fn is_transient(&self) -> bool {
        match self {
            Self::UnknownLease { .. } => false,
            Self::Configuration(_) => false,
            Self::Validation(_) => false,
        }
    }
}

/// Configuration errors, rejected at construction time
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Validation errors for field-level input checks
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    Required { field: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
