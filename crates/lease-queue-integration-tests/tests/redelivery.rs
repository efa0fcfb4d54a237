//! Redelivery paths: nack, lease extension, and unknown-lease errors.

mod common;

use common::{fast_config, message};
use lease_queue::{MessageId, QueueError, QueueService};
use std::time::Duration;
use tokio_test::assert_ok;

#[tokio::test]
async fn nack_makes_message_immediately_pollable() {
    let service = QueueService::start(fast_config(3)).unwrap();
    service.enqueue(message("m-1", "job"));

    let batch = service.poll(1);
    assert_eq!(batch[0].attempt_count, 1);

    assert_ok!(service.nack(&batch[0].id));

    // No waiting for the visibility timeout.
    let batch = service.poll(1);
    assert_eq!(batch[0].id.as_str(), "m-1");
    assert_eq!(batch[0].attempt_count, 2);

    service.shutdown().await;
}

#[tokio::test]
async fn extend_lease_keeps_message_invisible() {
    let service = QueueService::start(fast_config(3)).unwrap();
    service.enqueue(message("m-1", "slow job"));

    let batch = service.poll(1);
    let extended = service
        .extend_lease(&batch[0].id, chrono::Duration::seconds(5))
        .unwrap();
    assert!(extended > batch[0].leased_until);

    // Several visibility timeouts and reap cycles pass.
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert!(service.poll(1).is_empty());
    assert_eq!(service.stats().leased, 1);
    assert_ok!(service.ack(&batch[0].id));

    service.shutdown().await;
}

#[tokio::test]
async fn unknown_lease_errors_surface_through_the_facade() {
    let service = QueueService::start(fast_config(3)).unwrap();
    let id: MessageId = "never-delivered".parse().unwrap();

    assert!(matches!(
        service.ack(&id),
        Err(QueueError::UnknownLease { .. })
    ));
    assert!(matches!(
        service.nack(&id),
        Err(QueueError::UnknownLease { .. })
    ));
    assert!(matches!(
        service.extend_lease(&id, chrono::Duration::seconds(1)),
        Err(QueueError::UnknownLease { .. })
    ));

    service.shutdown().await;
}
