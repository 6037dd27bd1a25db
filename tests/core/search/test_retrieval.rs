// Multi-query retrieval against a built collection

use crate::common::{
    test_config, test_service, test_service_with, CountingEmbedder, CountingLlm, EchoLlm,
    TestDocs,
};
use docrag::core::error::DocRagError;
use docrag::core::providers::HashingEmbedder;
use docrag::core::types::Document;
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_retrieve_before_ingest_makes_no_model_calls() {
    let temp = TempDir::new().unwrap();
    let llm = Arc::new(CountingLlm::new(EchoLlm));
    let embedder = Arc::new(CountingEmbedder::new(Arc::new(
        HashingEmbedder::new(128).unwrap(),
    )));
    let service = test_service_with(test_config(&temp), embedder.clone(), llm.clone());

    assert!(matches!(
        service.retrieve("anything?"),
        Err(DocRagError::IndexNotReady(_))
    ));
    assert!(matches!(
        service.ask("anything?"),
        Err(DocRagError::IndexNotReady(_))
    ));

    assert_eq!(llm.calls(), 0);
    assert_eq!(embedder.batches(), 0);
}

#[test]
fn test_blank_question_is_invalid() {
    let temp = TempDir::new().unwrap();
    let service = test_service(&temp);

    assert!(matches!(
        service.retrieve("   "),
        Err(DocRagError::InvalidQuery(_))
    ));
}

#[test]
fn test_most_similar_chunk_ranks_first() {
    let temp = TempDir::new().unwrap();
    let docs = TestDocs::new();
    let service = test_service(&temp);
    service
        .ingest(&Document::from_path(&docs.two_topics()).unwrap())
        .unwrap();

    let result = service
        .retrieve("Rust ownership moves values between bindings")
        .unwrap();

    assert!(result.chunks[0].chunk.text.contains("ownership"));
    assert!(result.chunks[0].score > 0.5);
}

#[test]
fn test_results_bounded_by_k_and_unique() {
    let temp = TempDir::new().unwrap();
    let docs = TestDocs::new();
    let service = test_service(&temp);
    service
        .ingest(&Document::from_path(&docs.two_topics()).unwrap())
        .unwrap();

    let result = service.retrieve("bread flour").unwrap();
    let k = service.config().retrieval.k_per_query;

    assert!(result.len() <= k * result.queries.len());
    let ids: HashSet<_> = result.chunks.iter().map(|c| c.chunk.id()).collect();
    assert_eq!(ids.len(), result.len());
    assert!(result.chunks.iter().all(|c| c.query == "bread flour"));
}

#[test]
fn test_ingest_embeds_all_chunks_in_one_batch() {
    let temp = TempDir::new().unwrap();
    let docs = TestDocs::new();
    let embedder = Arc::new(CountingEmbedder::new(Arc::new(
        HashingEmbedder::new(128).unwrap(),
    )));
    let service = test_service_with(test_config(&temp), embedder.clone(), Arc::new(EchoLlm));

    let ready = service
        .ingest(&Document::from_path(&docs.two_topics()).unwrap())
        .unwrap();

    assert_eq!(embedder.batches(), 1);
    assert_eq!(embedder.texts(), ready.chunks_created);
}
