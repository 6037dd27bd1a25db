//! CLI test helpers
//!
//! Provides utilities for testing CLI commands including:
//! - Arc<RagService> wrappers matching CLI execute() signatures
//! - Services with a document already ingested
//! - Running the chat loop against scripted input

use crate::common::{sky_text, test_service};
use docrag::cli::commands::chat::run_loop;
use docrag::cli::OutputFormat;
use docrag::core::services::RagService;
use docrag::core::session::ChatSession;
use docrag::core::types::Document;
use std::io::Cursor;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a test service wrapped in Arc (matching CLI execute() signatures)
pub fn create_cli_test_service() -> (Arc<RagService>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let service = test_service(&temp_dir);
    (service, temp_dir)
}

/// Create a test service with the sky document already ingested
pub fn create_ready_service() -> (Arc<RagService>, TempDir) {
    let (service, temp_dir) = create_cli_test_service();
    service
        .ingest(&Document::new("sky.txt", sky_text(100).into_bytes()))
        .expect("Failed to ingest");
    (service, temp_dir)
}

/// Feed `input` to the chat loop and return everything it wrote
pub fn run_chat(session: &mut ChatSession, input: &str, format: OutputFormat) -> String {
    colored::control::set_override(false);

    let mut out = Vec::new();
    run_loop(session, Cursor::new(input.to_string()), &mut out, format, true)
        .expect("chat loop failed");
    String::from_utf8(out).expect("chat output is UTF-8")
}

/// Parse JSON-lines chat output
pub fn json_events(output: &str) -> Vec<serde_json::Value> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("each line is a JSON event"))
        .collect()
}

#[test]
fn test_helpers_ready_service() {
    let (service, _temp) = create_ready_service();
    assert_eq!(
        service.status(),
        docrag::core::types::IndexStatus::Ready
    );
}
