//! Tests for the ingest command

use super::test_helpers::create_cli_test_service;
use crate::common::TestDocs;
use docrag::cli::commands::{ingest, IngestArgs};
use docrag::cli::OutputFormat;
use docrag::core::types::IndexStatus;

#[test]
fn test_ingest_text_document() {
    let (service, _temp) = create_cli_test_service();
    let docs = TestDocs::new();

    let args = IngestArgs {
        path: docs.colors(),
        quiet: true,
    };
    let result = ingest::execute(args, &service, OutputFormat::Human);

    assert!(result.is_ok(), "ingest failed: {:?}", result.err());
    assert_eq!(service.status(), IndexStatus::Ready);
}

#[test]
fn test_ingest_json_output() {
    let (service, _temp) = create_cli_test_service();
    let docs = TestDocs::new();

    let args = IngestArgs {
        path: docs.two_topics(),
        quiet: false,
    };
    assert!(ingest::execute(args, &service, OutputFormat::Json).is_ok());
    assert_eq!(
        service.info().unwrap().unwrap().metadata.source,
        "topics.md"
    );
}

#[test]
fn test_ingest_directory_is_rejected() {
    let (service, _temp) = create_cli_test_service();
    let docs = TestDocs::new();

    let args = IngestArgs {
        path: docs.path().to_path_buf(),
        quiet: true,
    };
    let err = ingest::execute(args, &service, OutputFormat::Human).unwrap_err();

    assert!(err.to_string().contains("is not a file"));
    assert_eq!(service.status(), IndexStatus::Empty);
}

#[test]
fn test_ingest_unsupported_document_fails() {
    let (service, _temp) = create_cli_test_service();
    let docs = TestDocs::new();

    let args = IngestArgs {
        path: docs.binary(),
        quiet: true,
    };
    let err = ingest::execute(args, &service, OutputFormat::Human).unwrap_err();

    assert!(err.to_string().contains("unsupported"));
}
