//! Persisted vector collection.
//!
//! A single named collection lives at a fixed directory. Builds are
//! written to a sibling staging directory and renamed into place, so a
//! collection on disk is either complete or absent.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::config::StorageConfig;
use crate::core::error::{DocRagError, Result};
use crate::core::providers::EmbeddingProvider;
use crate::core::search::similarity::{cosine_similarity, top_k};
use crate::core::storage::retry::RetryPolicy;
use crate::core::storage::validator::{calculate_directory_size, CollectionValidator};
use crate::core::types::{Chunk, ScoredChunk};

/// Current on-disk format version
pub const SCHEMA_VERSION: u32 = 1;

const METADATA_FILE: &str = "collection.json";
const ENTRIES_FILE: &str = "entries.json";

/// Collection metadata (Schema v1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub name: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub chunk_count: usize,
    pub dimensions: usize,
    pub chunk_size: usize,
    pub overlap: usize,
    pub embedding_model: String,
    pub schema_version: u32,
}

/// One stored (chunk, vector) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}

/// Chunking parameters recorded with a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLayout {
    pub chunk_size: usize,
    pub overlap: usize,
}

/// Metadata plus on-disk footprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub metadata: CollectionMetadata,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Loaded, searchable collection
#[derive(Debug, Clone)]
pub struct VectorIndex {
    metadata: CollectionMetadata,
    entries: Vec<IndexEntry>,
    path: PathBuf,
}

impl VectorIndex {
    pub fn metadata(&self) -> &CollectionMetadata {
        &self.metadata
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.metadata.dimensions
    }

    /// Nearest chunks by cosine similarity.
    ///
    /// Results are ordered by descending score; ties go to the lower
    /// `chunk_index`. `k == 0` or an empty collection yields nothing.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        if k == 0 || self.entries.is_empty() {
            return Ok(Vec::new());
        }

        if query.len() != self.metadata.dimensions {
            return Err(DocRagError::DimensionMismatch {
                expected: self.metadata.dimensions,
                actual: query.len(),
            });
        }

        let scores = self
            .entries
            .iter()
            .map(|entry| (entry.chunk.chunk_index, cosine_similarity(query, &entry.vector)))
            .collect();

        // chunk_index equals position, checked on build and open
        Ok(top_k(scores, k)
            .into_iter()
            .map(|(index, score)| ScoredChunk {
                chunk: self.entries[index].chunk.clone(),
                score,
            })
            .collect())
    }
}

/// Owner of the single collection directory
#[derive(Debug, Clone)]
pub struct CollectionStore {
    root: PathBuf,
    name: String,
    retry: RetryPolicy,
}

impl CollectionStore {
    /// Create a store for the collection at `root`
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
            retry,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(
            config.index_dir.clone(),
            config.collection_name.clone(),
            RetryPolicy::from_config(config),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn staging_dir(&self) -> PathBuf {
        let mut name = self
            .root
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "collection".into());
        name.push(".building");
        self.root.with_file_name(name)
    }

    /// Check whether a collection is present on disk
    pub fn exists(&self) -> bool {
        self.root.join(METADATA_FILE).exists()
    }

    /// Build a fresh collection from `chunks`.
    ///
    /// Any existing collection is destroyed first. All chunks are
    /// embedded with one batch call. Nothing is left on disk if any step
    /// fails.
    pub fn build(
        &self,
        source: &str,
        chunks: &[Chunk],
        layout: ChunkLayout,
        embedder: &dyn EmbeddingProvider,
    ) -> Result<VectorIndex> {
        self.destroy()?;

        let vectors = if chunks.is_empty() {
            tracing::info!("No chunks for {}, building empty collection", source);
            Vec::new()
        } else {
            let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
            tracing::info!(
                "Embedding {} chunks with {}",
                texts.len(),
                embedder.model_id()
            );
            embedder.embed_batch(&texts)?
        };

        let dimensions = check_vectors(chunks.len(), &vectors)?;

        let metadata = CollectionMetadata {
            name: self.name.clone(),
            source: source.to_string(),
            created_at: Utc::now(),
            chunk_count: chunks.len(),
            dimensions,
            chunk_size: layout.chunk_size,
            overlap: layout.overlap,
            embedding_model: embedder.model_id(),
            schema_version: SCHEMA_VERSION,
        };

        let entries: Vec<IndexEntry> = chunks
            .iter()
            .enumerate()
            .zip(vectors)
            .map(|((position, chunk), vector)| IndexEntry {
                chunk: Chunk {
                    chunk_index: position,
                    ..chunk.clone()
                },
                vector,
            })
            .collect();

        let staging = self.staging_dir();
        if let Err(e) = self.persist(&staging, &metadata, &entries) {
            if let Err(cleanup) = self.retry.remove_dir_all(&staging) {
                tracing::error!("Failed to remove staging directory: {}", cleanup);
            }
            return Err(e);
        }

        tracing::info!(
            "Collection '{}' built: {} chunks, {} dimensions",
            self.name,
            metadata.chunk_count,
            metadata.dimensions
        );

        Ok(VectorIndex {
            metadata,
            entries,
            path: self.root.clone(),
        })
    }

    fn persist(
        &self,
        staging: &Path,
        metadata: &CollectionMetadata,
        entries: &[IndexEntry],
    ) -> Result<()> {
        self.retry.remove_dir_all(staging)?;
        fs::create_dir_all(staging)?;

        fs::write(staging.join(ENTRIES_FILE), serde_json::to_vec(entries)?)?;
        // Metadata last: its presence marks a complete collection
        fs::write(
            staging.join(METADATA_FILE),
            serde_json::to_string_pretty(metadata)?,
        )?;

        fs::rename(staging, &self.root).map_err(|e| {
            DocRagError::StorageError(format!(
                "cannot move collection into {}: {e}",
                self.root.display()
            ))
        })?;

        Ok(())
    }

    /// Load the persisted collection, if any.
    ///
    /// Returns `Ok(None)` when nothing is stored and
    /// [`DocRagError::CorruptCollection`] when the stored collection is
    /// partial or inconsistent.
    pub fn open(&self) -> Result<Option<VectorIndex>> {
        if !self.root.exists() {
            return Ok(None);
        }

        let meta_path = self.root.join(METADATA_FILE);
        if !meta_path.exists() {
            return Err(DocRagError::CorruptCollection(format!(
                "{} has no {}",
                self.root.display(),
                METADATA_FILE
            )));
        }

        let metadata: CollectionMetadata = read_json(&meta_path)?;
        let entries: Vec<IndexEntry> = read_json(&self.root.join(ENTRIES_FILE))?;

        let report = CollectionValidator::new(&metadata, &entries).validate(&self.root);
        if !report.is_consistent {
            return Err(DocRagError::CorruptCollection(report.issues.join("; ")));
        }

        tracing::info!(
            "Opened collection '{}' from {} ({} chunks)",
            metadata.name,
            metadata.source,
            metadata.chunk_count
        );

        Ok(Some(VectorIndex {
            metadata,
            entries,
            path: self.root.clone(),
        }))
    }

    /// Remove the collection and any leftover staging data.
    ///
    /// Idempotent: destroying nothing succeeds.
    pub fn destroy(&self) -> Result<()> {
        self.retry.remove_dir_all(&self.staging_dir())?;
        self.retry.remove_dir_all(&self.root)?;
        tracing::debug!("Collection storage at {:?} cleared", self.root);
        Ok(())
    }

    /// Metadata and on-disk size of the stored collection
    pub fn info(&self) -> Result<Option<CollectionInfo>> {
        let meta_path = self.root.join(METADATA_FILE);
        if !meta_path.exists() {
            return Ok(None);
        }

        Ok(Some(CollectionInfo {
            metadata: read_json(&meta_path)?,
            path: self.root.clone(),
            size_bytes: calculate_directory_size(&self.root),
        }))
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let contents = fs::read(path).map_err(|e| {
        DocRagError::CorruptCollection(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_slice(&contents).map_err(|e| {
        DocRagError::CorruptCollection(format!("cannot parse {}: {e}", path.display()))
    })
}

/// One vector per chunk, all the same non-zero length, all finite
fn check_vectors(expected: usize, vectors: &[Vec<f32>]) -> Result<usize> {
    if vectors.len() != expected {
        return Err(DocRagError::provider(
            "embedding",
            format!("expected {expected} vectors, got {}", vectors.len()),
        ));
    }

    let Some(first) = vectors.first() else {
        return Ok(0);
    };
    let dimensions = first.len();
    if dimensions == 0 {
        return Err(DocRagError::provider("embedding", "empty embedding vector"));
    }

    for vector in vectors {
        if vector.len() != dimensions {
            return Err(DocRagError::DimensionMismatch {
                expected: dimensions,
                actual: vector.len(),
            });
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(DocRagError::provider(
                "embedding",
                "embedding contains non-finite values",
            ));
        }
    }

    Ok(dimensions)
}
