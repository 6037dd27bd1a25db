// Queries and builds from several threads

use crate::common::{sky_text, test_config, test_service, test_service_with, EchoLlm};
use docrag::core::error::{DocRagError, Result};
use docrag::core::providers::{EmbeddingProvider, HashingEmbedder};
use docrag::core::types::{Document, IndexStatus};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

/// Blocks the first batch until released
struct GatedEmbedder {
    inner: HashingEmbedder,
    started: Mutex<Option<Sender<()>>>,
    release: Mutex<Receiver<()>>,
}

impl EmbeddingProvider for GatedEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if let Some(started) = self.started.lock().unwrap().take() {
            started.send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
        }
        self.inner.embed_batch(texts)
    }

    fn model_id(&self) -> String {
        self.inner.model_id()
    }
}

#[test]
fn test_queries_rejected_while_building() {
    let temp = TempDir::new().unwrap();
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let embedder = Arc::new(GatedEmbedder {
        inner: HashingEmbedder::new(128).unwrap(),
        started: Mutex::new(Some(started_tx)),
        release: Mutex::new(release_rx),
    });
    let service = test_service_with(test_config(&temp), embedder, Arc::new(EchoLlm));

    let builder = {
        let service = Arc::clone(&service);
        thread::spawn(move || service.ingest(&Document::new("sky.txt", sky_text(50).into_bytes())))
    };

    // Build is now blocked inside the embedding call
    started_rx.recv().unwrap();
    assert_eq!(service.status(), IndexStatus::Building);

    let err = service.ask("What colour is the sky?").unwrap_err();
    assert!(matches!(err, DocRagError::IndexBuilding(_)));
    assert!(err.is_transient());
    assert!(matches!(
        service.retrieve("What colour is the sky?"),
        Err(DocRagError::IndexBuilding(_))
    ));
    assert!(service.info().unwrap().is_none());

    release_tx.send(()).unwrap();
    builder.join().unwrap().unwrap();

    assert_eq!(service.status(), IndexStatus::Ready);
    assert!(service.ask("What colour is the sky?").is_ok());
}

#[test]
fn test_parallel_queries_on_ready_index() {
    let temp = TempDir::new().unwrap();
    let service = test_service(&temp);
    service
        .ingest(&Document::new("sky.txt", sky_text(200).into_bytes()))
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.ask(&format!("Question {i}: what colour is the sky?")))
        })
        .collect();

    for handle in handles {
        let answer = handle.join().unwrap().unwrap();
        assert!(answer.text.contains("blue"));
    }
}

#[test]
fn test_concurrent_builds_leave_one_collection() {
    let temp = TempDir::new().unwrap();
    let service = test_service(&temp);

    let handles: Vec<_> = ["first.txt", "second.txt", "third.txt"]
        .into_iter()
        .map(|name| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                service.ingest(&Document::new(name, format!("{name} ").repeat(100).into_bytes()))
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(service.status(), IndexStatus::Ready);
    let info = service.info().unwrap().unwrap();
    let result = service.retrieve("which file?").unwrap();
    assert!(result
        .chunks
        .iter()
        .all(|c| c.chunk.source == info.metadata.source));
}

#[test]
fn test_reset_during_queries_ends_empty() {
    let temp = TempDir::new().unwrap();
    let service = test_service(&temp);
    service
        .ingest(&Document::new("sky.txt", sky_text(200).into_bytes()))
        .unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for _ in 0..10 {
                    match service.ask("Is the sky blue?") {
                        Ok(_) | Err(DocRagError::IndexNotReady(_)) => {}
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
            })
        })
        .collect();

    service.reset().unwrap();

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(service.status(), IndexStatus::Empty);
}
