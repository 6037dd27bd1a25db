// Full pipeline runs with offline providers

use crate::common::{
    assert_valid_ready, sky_text, test_config, test_service_with, CountingLlm, EchoLlm,
    TestDocs,
};
use docrag::core::config::Config;
use docrag::core::error::DocRagError;
use docrag::core::providers::HashingEmbedder;
use docrag::core::session::ChatSession;
use docrag::core::types::{Document, IndexStatus, Role};
use std::sync::Arc;
use tempfile::TempDir;

fn default_layout_config(temp: &TempDir) -> Config {
    let mut config = test_config(temp);
    config.ingest.chunk_size = 7500;
    config.ingest.overlap = 100;
    config
}

#[test]
fn test_sky_document_answers_blue() {
    let temp = TempDir::new().unwrap();
    let service = test_service_with(
        default_layout_config(&temp),
        Arc::new(HashingEmbedder::new(128).unwrap()),
        Arc::new(EchoLlm),
    );

    let ready = service
        .ingest(&Document::new("sky.txt", sky_text(1000).into_bytes()))
        .unwrap();
    assert_valid_ready(&ready);
    assert!(ready.chunks_created >= 2);
    assert_eq!(ready.text_chars, 17000);

    let answer = service.ask("What color is the sky?").unwrap();

    assert!(answer.text.contains("blue"));
    assert_eq!(answer.queries, vec!["What color is the sky?"]);
    assert!(!answer.sources.is_empty());
    assert!(answer.sources.iter().all(|s| s.source == "sky.txt"));
}

#[test]
fn test_answer_is_grounded_in_prompt_context() {
    let temp = TempDir::new().unwrap();
    let docs = TestDocs::new();
    let llm = Arc::new(CountingLlm::new(EchoLlm));
    let service = test_service_with(
        test_config(&temp),
        Arc::new(HashingEmbedder::new(128).unwrap()),
        llm.clone(),
    );
    service
        .ingest(&Document::from_path(&docs.colors()).unwrap())
        .unwrap();

    let answer = service.ask("What colour is snow?").unwrap();

    assert!(answer.text.starts_with("Answer the question based ONLY on the following context:"));
    assert!(answer.text.contains("Snow is white."));
    assert!(answer.text.contains("Question: What colour is snow?"));
    // One expansion call plus one synthesis call
    assert_eq!(llm.calls(), 2);
}

#[test]
fn test_single_collection_after_reingest() {
    let temp = TempDir::new().unwrap();
    let docs = TestDocs::new();
    let service = test_service_with(
        test_config(&temp),
        Arc::new(HashingEmbedder::new(128).unwrap()),
        Arc::new(EchoLlm),
    );

    service
        .ingest(&Document::from_path(&docs.two_topics()).unwrap())
        .unwrap();
    service
        .ingest(&Document::from_path(&docs.colors()).unwrap())
        .unwrap();

    let answer = service.ask("Rust ownership moves values").unwrap();
    assert!(answer.sources.iter().all(|s| s.source == "colors.txt"));
    assert!(!answer.text.contains("bindings"));

    // Only the collection directory remains
    let entries: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["vector_db"]);
}

#[test]
fn test_full_cycle_with_reset() {
    let temp = TempDir::new().unwrap();
    let service = test_service_with(
        test_config(&temp),
        Arc::new(HashingEmbedder::new(128).unwrap()),
        Arc::new(EchoLlm),
    );
    let mut session = ChatSession::new(Arc::clone(&service));

    session
        .ingest(&Document::new("sky.txt", sky_text(40).into_bytes()))
        .unwrap();
    session.ask("Is the sky blue?").unwrap();
    assert_eq!(session.turns().len(), 2);

    session.reset().unwrap();
    assert!(session.turns().is_empty());
    assert_eq!(service.status(), IndexStatus::Empty);

    let err = session.ask("Is the sky blue?").unwrap_err();
    assert!(matches!(err, DocRagError::IndexNotReady(_)));
    assert!(err.is_user_actionable());
    assert_eq!(session.turns().len(), 1);
    assert_eq!(session.turns()[0].role, Role::User);

    session
        .ingest(&Document::new("sky.txt", sky_text(40).into_bytes()))
        .unwrap();
    assert!(session.ask("Is the sky blue?").is_ok());
}
