//! Ingestion pipeline orchestration.
//!
//! Coordinates the document half of the build phase:
//! 1. Stage the uploaded bytes in a scoped temporary directory
//! 2. Extract plain text
//! 3. Release the staging directory
//! 4. Chunk the text
//!
//! Embedding and persistence happen afterwards in the storage layer.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tempfile::TempDir;

use crate::core::error::{DocRagError, Result};
use crate::core::ingest::{Chunker, ExtractorRegistry};
use crate::core::types::{Chunk, Document, TextBlock};

/// Output of the document stages
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    /// Source document name
    pub source: String,

    /// Characters of extracted text
    pub text_chars: usize,

    /// Chunks in document order
    pub chunks: Vec<Chunk>,

    /// Extraction + chunking time in milliseconds
    pub duration_ms: u64,
}

/// Orchestrates extraction and chunking for one document
pub struct IngestPipeline {
    extractors: ExtractorRegistry,
    chunker: Chunker,
    max_document_bytes: usize,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline
    ///
    /// # Arguments
    ///
    /// * `chunk_size` - Size of chunks in characters
    /// * `overlap` - Overlap between chunks in characters
    /// * `max_document_size_mb` - Maximum accepted document size
    pub fn new(chunk_size: usize, overlap: usize, max_document_size_mb: usize) -> Result<Self> {
        Ok(Self {
            extractors: ExtractorRegistry::new(),
            chunker: Chunker::new(chunk_size, overlap)?,
            max_document_bytes: max_document_size_mb.saturating_mul(1024 * 1024),
        })
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Run extraction and chunking for a document
    pub fn prepare(&self, document: &Document) -> Result<PreparedDocument> {
        let start = Instant::now();

        let block = self.extract(document)?;
        if block.is_empty() {
            tracing::warn!("No extractable text in {}", document.name);
        }

        let chunks = self.chunker.split(&block);
        let text_chars = block.text.chars().count();

        tracing::info!(
            "Prepared {}: {} chars, {} chunks",
            document.name,
            text_chars,
            chunks.len()
        );

        Ok(PreparedDocument {
            source: block.source,
            text_chars,
            chunks,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Stage the document on disk and extract its text.
    ///
    /// The staging directory is removed before this returns, on
    /// success and on failure alike.
    pub fn extract(&self, document: &Document) -> Result<TextBlock> {
        if document.len() > self.max_document_bytes {
            return Err(DocRagError::extraction(
                &document.name,
                format!(
                    "document is {} bytes, limit is {} bytes",
                    document.len(),
                    self.max_document_bytes
                ),
            ));
        }

        let file_name = staged_file_name(&document.name);

        let staging = TempDir::new()
            .map_err(|e| DocRagError::extraction(&document.name, format!("cannot stage: {e}")))?;
        let staged_path = staging.path().join(&file_name);

        let result = fs::write(&staged_path, &document.bytes)
            .map_err(|e| DocRagError::extraction(&document.name, format!("cannot stage: {e}")))
            .and_then(|()| {
                tracing::debug!("Document staged at {:?}", staged_path);
                self.extractors.extract(&staged_path, &document.name)
            });

        let staging_path = staging.path().to_path_buf();
        if let Err(e) = staging.close() {
            tracing::warn!("Error removing staging directory {:?}: {}", staging_path, e);
        } else {
            tracing::debug!("Staging directory {:?} removed", staging_path);
        }

        result
    }
}

/// File name used for the staged copy: the last path component only
fn staged_file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty() && n != "..")
        .unwrap_or_else(|| "document".to_string())
}
