//! Tests for the reset command

use super::test_helpers::{create_cli_test_service, create_ready_service};
use docrag::cli::commands::{reset, ResetArgs};
use docrag::cli::OutputFormat;
use docrag::core::types::IndexStatus;

#[test]
fn test_reset_with_force_deletes_collection() {
    let (service, temp) = create_ready_service();

    let result = reset::execute(ResetArgs { force: true }, &service, OutputFormat::Human);

    assert!(result.is_ok());
    assert_eq!(service.status(), IndexStatus::Empty);
    assert!(!temp.path().join("vector_db").exists());
}

#[test]
fn test_reset_when_empty_needs_no_confirmation() {
    let (service, _temp) = create_cli_test_service();

    // No prompt is shown without a collection, so force is not needed
    let result = reset::execute(ResetArgs { force: false }, &service, OutputFormat::Json);

    assert!(result.is_ok());
    assert_eq!(service.status(), IndexStatus::Empty);
}
