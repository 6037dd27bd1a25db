//! RAG service facade.
//!
//! Composes the typed pipeline behind four operations:
//!
//! ```text
//! ingest: Document → extract → chunk → [lock] destroy → embed → persist → Ready
//! ask:    question → [read] expand → embed → search → merge → synthesize
//! reset:  [lock] destroy → Empty
//! status: current lifecycle state
//! ```
//!
//! All adapters share one `RagService` (usually behind an `Arc`).

use std::sync::Arc;
use std::time::Instant;

use crate::core::config::Config;
use crate::core::error::{DocRagError, Result};
use crate::core::ingest::IngestPipeline;
use crate::core::lifecycle::IndexLifecycle;
use crate::core::providers::{self, EmbeddingProvider, LanguageModel};
use crate::core::search::Retriever;
use crate::core::storage::{ChunkLayout, CollectionInfo, CollectionStore};
use crate::core::synthesizer::AnswerSynthesizer;
use crate::core::types::{Answer, Document, IndexReady, IndexStatus, RetrievalResult, SourceRef};

/// Single-document RAG engine
pub struct RagService {
    config: Arc<Config>,
    pipeline: IngestPipeline,
    store: CollectionStore,
    lifecycle: IndexLifecycle,
    retriever: Retriever,
    synthesizer: AnswerSynthesizer,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LanguageModel>,
}

impl RagService {
    /// Create the service with explicit providers.
    ///
    /// Validates `config` and loads a previously persisted collection.
    /// A corrupt collection, or one built with a different embedding
    /// model, is logged and the service starts `Empty`.
    pub fn new(
        config: Config,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LanguageModel>,
    ) -> Result<Self> {
        config.validate()?;

        let pipeline = IngestPipeline::new(
            config.ingest.chunk_size,
            config.ingest.overlap,
            config.ingest.max_document_size_mb,
        )?;
        let store = CollectionStore::from_config(&config.storage);

        let existing = match store.open() {
            Ok(Some(index)) if index.metadata().embedding_model != embedder.model_id() => {
                tracing::warn!(
                    "Ignoring collection at {:?}: built with embedding model '{}', configured '{}'",
                    store.root(),
                    index.metadata().embedding_model,
                    embedder.model_id()
                );
                None
            }
            Ok(index) => index,
            Err(e) => {
                tracing::warn!(
                    "Ignoring unusable collection at {:?}: {}",
                    store.root(),
                    e
                );
                None
            }
        };

        Ok(Self {
            pipeline,
            store,
            lifecycle: IndexLifecycle::new(existing),
            retriever: Retriever::from_config(&config.retrieval),
            synthesizer: AnswerSynthesizer::from_config(&config.generation),
            embedder,
            llm,
            config: Arc::new(config),
        })
    }

    /// Create the service with providers built from `config`
    pub fn from_config(config: Config) -> Result<Self> {
        Self::with_chat_model(config, None)
    }

    /// Like [`RagService::from_config`] with a different chat model
    pub fn with_chat_model(config: Config, chat_model: Option<&str>) -> Result<Self> {
        let embedder = providers::build_embedder(&config.providers)?;
        let llm = providers::build_language_model(&config.providers, chat_model)?;
        Self::new(config, embedder, llm)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn embedder(&self) -> &dyn EmbeddingProvider {
        self.embedder.as_ref()
    }

    pub fn language_model(&self) -> &dyn LanguageModel {
        self.llm.as_ref()
    }

    /// Replace the active collection with one built from `document`.
    ///
    /// Extraction and chunking run first; if they fail the current
    /// state is untouched. Once the build starts any failure leaves the
    /// service `Empty`.
    pub fn ingest(&self, document: &Document) -> Result<IndexReady> {
        let start = Instant::now();
        tracing::info!("Ingesting {} ({} bytes)", document.name, document.len());

        let prepared = self.pipeline.prepare(document)?;

        let build = self.lifecycle.begin_build();
        let layout = ChunkLayout {
            chunk_size: self.pipeline.chunker().chunk_size(),
            overlap: self.pipeline.chunker().overlap(),
        };

        let index = match self.store.build(
            &prepared.source,
            &prepared.chunks,
            layout,
            self.embedder.as_ref(),
        ) {
            Ok(index) => index,
            Err(e) => {
                tracing::error!("Build failed for {}: {}", document.name, e);
                return Err(e);
            }
        };

        let chunks_created = index.len();
        let dimensions = index.dimensions();
        let storage_path = index.path().to_path_buf();
        build.commit(index);

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Ingested {}: {} chunks in {}ms",
            prepared.source,
            chunks_created,
            duration_ms
        );

        Ok(IndexReady {
            source: prepared.source,
            text_chars: prepared.text_chars,
            chunks_created,
            dimensions,
            storage_path,
            duration_ms,
        })
    }

    fn check_question(question: &str) -> Result<&str> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DocRagError::InvalidQuery(
                "question cannot be empty".to_string(),
            ));
        }
        Ok(question)
    }

    /// Expanded retrieval without answer synthesis
    pub fn retrieve(&self, question: &str) -> Result<RetrievalResult> {
        let question = Self::check_question(question)?;
        let index = self.lifecycle.read()?;
        self.retriever
            .retrieve(question, Some(&*index), self.embedder.as_ref(), self.llm.as_ref())
    }

    /// Answer a question from the active collection
    pub fn ask(&self, question: &str) -> Result<Answer> {
        let start = Instant::now();
        let question = Self::check_question(question)?;
        let index = self.lifecycle.read()?;

        let retrieval = self.retriever.retrieve(
            question,
            Some(&*index),
            self.embedder.as_ref(),
            self.llm.as_ref(),
        )?;
        let (text, context) = self.synthesizer.answer(&retrieval, self.llm.as_ref())?;
        let sources = context.iter().map(SourceRef::from).collect();

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!("Answered in {}ms", duration_ms);

        Ok(Answer {
            text,
            queries: retrieval.queries,
            sources,
            duration_ms,
        })
    }

    /// Delete the active collection. Idempotent.
    ///
    /// The service is `Empty` afterwards even if storage cleanup fails.
    pub fn reset(&self) -> Result<()> {
        let _destroy = self.lifecycle.begin_destroy();
        self.store.destroy()?;
        tracing::info!("Collection deleted");
        Ok(())
    }

    pub fn status(&self) -> IndexStatus {
        self.lifecycle.status()
    }

    /// Stored collection metadata and size, when `Ready`
    pub fn info(&self) -> Result<Option<CollectionInfo>> {
        if self.lifecycle.current().is_none() {
            return Ok(None);
        }
        self.store.info()
    }
}
