//! Queue configuration.

use crate::error::ConfigurationError;
use chrono::Duration;

/// Construction-time configuration for the queue engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// Redeliveries allowed after the first delivery. The total delivery
    /// budget for a message is `max_retries + 1`; once it is spent the
    /// message is routed to the dead-letter queue.
    pub max_retries: u32,
    /// How long a delivered message stays invisible to other consumers
    /// before the reaper may reclaim it. Assigned fresh on every delivery.
    pub visibility_timeout: Duration,
    /// Cadence of the background reaper.
    pub reap_interval: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            visibility_timeout: Duration::seconds(30),
            reap_interval: Duration::seconds(1),
        }
    }
}

impl QueueConfig {
    /// Reject configurations the engine cannot run with
    ///
    /// Called by [`crate::engine::QueueEngine::new`]; a failure here is
    /// fatal to startup.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.visibility_timeout <= Duration::zero() {
            return Err(ConfigurationError::Invalid {
                message: "visibility_timeout must be positive".to_string(),
            });
        }

        if self.reap_interval <= Duration::zero() {
            return Err(ConfigurationError::Invalid {
                message: "reap_interval must be positive".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
