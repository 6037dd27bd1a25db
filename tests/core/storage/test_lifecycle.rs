// Lifecycle transitions driven through RagService

use crate::common::{
    sky_text, test_config, test_service, test_service_with, CountingLlm, EchoLlm,
    FailingEmbedder, TestDocs,
};
use docrag::core::error::{DocRagError, Result};
use docrag::core::providers::{EmbeddingProvider, HashingEmbedder};
use docrag::core::types::{Document, IndexStatus};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_new_service_starts_empty() {
    let temp = TempDir::new().unwrap();
    let service = test_service(&temp);

    assert_eq!(service.status(), IndexStatus::Empty);
    assert!(service.info().unwrap().is_none());
}

#[test]
fn test_ingest_moves_to_ready() {
    let temp = TempDir::new().unwrap();
    let service = test_service(&temp);

    service
        .ingest(&Document::new("sky.txt", sky_text(30).into_bytes()))
        .unwrap();

    assert_eq!(service.status(), IndexStatus::Ready);
    assert_eq!(service.info().unwrap().unwrap().metadata.source, "sky.txt");
}

#[test]
fn test_reset_moves_to_empty_and_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let service = test_service(&temp);
    service
        .ingest(&Document::new("sky.txt", sky_text(30).into_bytes()))
        .unwrap();

    service.reset().unwrap();
    assert_eq!(service.status(), IndexStatus::Empty);

    service.reset().unwrap();
    assert_eq!(service.status(), IndexStatus::Empty);
    assert!(!temp.path().join("vector_db").exists());
}

#[test]
fn test_restart_reopens_persisted_collection() {
    let temp = TempDir::new().unwrap();
    {
        let service = test_service(&temp);
        service
            .ingest(&Document::new("sky.txt", sky_text(30).into_bytes()))
            .unwrap();
    }

    let service = test_service(&temp);
    assert_eq!(service.status(), IndexStatus::Ready);
    assert!(service.ask("What colour is the sky?").is_ok());
}

/// Same vectors as the inner embedder, reported under another model name
struct RenamedEmbedder(HashingEmbedder);

impl EmbeddingProvider for RenamedEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.0.embed_batch(texts)
    }

    fn model_id(&self) -> String {
        "other-embedder".to_string()
    }
}

#[test]
fn test_restart_with_other_dimensions_is_empty() {
    let temp = TempDir::new().unwrap();
    {
        let service = test_service(&temp);
        service
            .ingest(&Document::new("sky.txt", sky_text(30).into_bytes()))
            .unwrap();
    }

    let service = test_service_with(
        test_config(&temp),
        Arc::new(HashingEmbedder::new(32).unwrap()),
        Arc::new(EchoLlm),
    );
    assert_eq!(service.status(), IndexStatus::Empty);
    assert!(matches!(
        service.ask("What colour is the sky?"),
        Err(DocRagError::IndexNotReady(_))
    ));

    // Re-ingesting with the new embedder recovers
    let ready = service
        .ingest(&Document::new("sky.txt", sky_text(30).into_bytes()))
        .unwrap();
    assert_eq!(ready.dimensions, 32);
    assert!(service.ask("What colour is the sky?").is_ok());
}

#[test]
fn test_restart_with_other_model_same_dimensions_is_empty() {
    let temp = TempDir::new().unwrap();
    {
        let service = test_service(&temp);
        service
            .ingest(&Document::new("sky.txt", sky_text(30).into_bytes()))
            .unwrap();
    }

    let service = test_service_with(
        test_config(&temp),
        Arc::new(RenamedEmbedder(HashingEmbedder::new(128).unwrap())),
        Arc::new(EchoLlm),
    );
    assert_eq!(service.status(), IndexStatus::Empty);
    assert!(service.info().unwrap().is_none());
}

#[test]
fn test_corrupt_collection_at_startup_is_empty() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("vector_db");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("collection.json"), "{not json").unwrap();

    let service = test_service(&temp);
    assert_eq!(service.status(), IndexStatus::Empty);

    // The next ingest replaces the broken data
    service
        .ingest(&Document::new("sky.txt", sky_text(5).into_bytes()))
        .unwrap();
    assert_eq!(service.status(), IndexStatus::Ready);
}

#[test]
fn test_extraction_failure_keeps_previous_collection() {
    let temp = TempDir::new().unwrap();
    let docs = TestDocs::new();
    let service = test_service(&temp);
    service
        .ingest(&Document::new("sky.txt", sky_text(30).into_bytes()))
        .unwrap();

    let err = service
        .ingest(&Document::from_path(&docs.binary()).unwrap())
        .unwrap_err();

    assert!(matches!(err, DocRagError::Extraction { .. }));
    assert_eq!(service.status(), IndexStatus::Ready);
    assert_eq!(service.info().unwrap().unwrap().metadata.source, "sky.txt");
}

#[test]
fn test_embedding_failure_leaves_empty() {
    let temp = TempDir::new().unwrap();

    // Seed a collection with a working embedder
    test_service(&temp)
        .ingest(&Document::new("sky.txt", sky_text(30).into_bytes()))
        .unwrap();

    let service = test_service_with(
        test_config(&temp),
        Arc::new(FailingEmbedder),
        Arc::new(EchoLlm),
    );
    assert_eq!(service.status(), IndexStatus::Ready);

    let err = service
        .ingest(&Document::new("new.txt", b"new content".to_vec()))
        .unwrap_err();

    assert!(err.is_transient());
    assert_eq!(service.status(), IndexStatus::Empty);
    assert!(matches!(
        service.ask("anything?"),
        Err(DocRagError::IndexNotReady(_))
    ));
}

#[test]
fn test_empty_document_is_ready_without_context() {
    let temp = TempDir::new().unwrap();
    let llm = Arc::new(CountingLlm::new(EchoLlm));
    let service = test_service_with(
        test_config(&temp),
        Arc::new(HashingEmbedder::new(128).unwrap()),
        llm.clone(),
    );

    let ready = service.ingest(&Document::new("empty.txt", Vec::new())).unwrap();
    assert_eq!(ready.chunks_created, 0);
    assert_eq!(ready.dimensions, 0);
    assert_eq!(service.status(), IndexStatus::Ready);

    let answer = service.ask("What is in it?").unwrap();
    assert!(answer.sources.is_empty());
    assert!(llm.calls() >= 1);
}
