//! Common test utilities for lease-queue integration tests

use bytes::Bytes;
use chrono::Duration;
use lease_queue::{Message, QueueConfig};

/// Config with timings short enough for the reaper to act within a test
#[allow(dead_code)]
pub fn fast_config(max_retries: u32) -> QueueConfig {
    QueueConfig {
        max_retries,
        visibility_timeout: Duration::milliseconds(200),
        reap_interval: Duration::milliseconds(25),
    }
}

#[allow(dead_code)]
pub fn payload(body: &str) -> Bytes {
    Bytes::from(body.to_string())
}

#[allow(dead_code)]
pub fn message(id: &str, body: &str) -> Message {
    Message::new(payload(body)).with_id(id.parse().unwrap())
}
