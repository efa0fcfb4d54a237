//! Tests for the background reaper.

use super::*;
use crate::config::QueueConfig;
use crate::message::Message;
use chrono::Duration as ChronoDuration;

fn fast_engine() -> Arc<QueueEngine> {
    Arc::new(
        QueueEngine::new(QueueConfig {
            max_retries: 3,
            visibility_timeout: ChronoDuration::milliseconds(50),
            reap_interval: ChronoDuration::milliseconds(20),
        })
        .unwrap(),
    )
}

#[tokio::test]
async fn test_reaper_requeues_expired_leases() {
    let engine = fast_engine();
    let reaper = spawn_reaper(Arc::clone(&engine), Duration::from_millis(20));

    engine.enqueue(Message::new("job".into()));
    assert_eq!(engine.poll(1).len(), 1);

    // Well past the visibility timeout plus several reap cycles.
    tokio::time::sleep(Duration::from_millis(400)).await;

    let batch = engine.poll(1);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].attempt_count, 2);

    reaper.stop().await;
}

#[tokio::test]
async fn test_stop_halts_reaping() {
    let engine = fast_engine();
    let reaper = spawn_reaper(Arc::clone(&engine), Duration::from_millis(20));
    reaper.stop().await;

    engine.enqueue(Message::new("job".into()));
    assert_eq!(engine.poll(1).len(), 1);

    tokio::time::sleep(Duration::from_millis(400)).await;

    // The lease expired but nothing reclaims it after shutdown.
    assert_eq!(engine.stats().leased, 1);
    assert!(engine.poll(1).is_empty());
}

#[tokio::test]
async fn test_stop_is_idempotent() {
    let engine = fast_engine();
    let reaper = spawn_reaper(Arc::clone(&engine), Duration::from_millis(20));

    reaper.stop().await;
    reaper.stop().await;
}
