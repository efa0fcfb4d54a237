//! Tests for error types.

use super::*;

#[test]
fn test_error_transience() {
    assert!(!QueueError::UnknownLease {
        message_id: "m-1".to_string(),
    }
    .is_transient());

    assert!(!QueueError::Configuration(ConfigurationError::Invalid {
        message: "bad".to_string(),
    })
    .is_transient());

    assert!(!QueueError::Validation(ValidationError::Required {
        field: "message_id".to_string(),
    })
    .is_transient());
}

#[test]
fn test_unknown_lease_display_names_the_message() {
    let error = QueueError::UnknownLease {
        message_id: "m-42".to_string(),
    };

    assert!(error.to_string().contains("m-42"));
}

#[test]
fn test_configuration_error_converts_into_queue_error() {
    let config_error = ConfigurationError::Invalid {
        message: "visibility_timeout must be positive".to_string(),
    };

    let error: QueueError = config_error.into();
    assert!(matches!(error, QueueError::Configuration(_)));
}

#[test]
fn test_validation_error_converts_into_queue_error() {
    let validation_error = ValidationError::Required {
        field: "message_id".to_string(),
    };

    let error: QueueError = validation_error.into();
    assert!(matches!(error, QueueError::Validation(_)));
}
