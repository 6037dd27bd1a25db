//! Core data types for docrag.
//!
//! This module defines the data model shared by the ingestion,
//! storage, retrieval and answer stages: documents, text blocks,
//! chunks, scored search hits, retrieval results, answers and
//! conversation turns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::error::{DocRagError, Result};

/// Raw document content plus an identifying name.
///
/// Transient: only lives for the duration of an ingest.
#[derive(Debug, Clone)]
pub struct Document {
    /// File name (no directory components)
    pub name: String,

    /// Raw bytes as uploaded
    pub bytes: Vec<u8>,
}

impl Document {
    /// Create a document from in-memory bytes
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a document from disk.
    ///
    /// The document name is the file name component of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| DocRagError::extraction(path.display().to_string(), "not a file"))?;

        let bytes = std::fs::read(path)
            .map_err(|e| DocRagError::extraction(&name, format!("cannot read file: {e}")))?;

        Ok(Self { name, bytes })
    }

    /// Size of the raw content in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the document has no content at all
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Plain text extracted from one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Source document name
    pub source: String,

    /// Extracted text (may be empty)
    pub text: String,
}

impl TextBlock {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Identity of a chunk within the single active collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkId {
    pub source: String,
    pub chunk_index: usize,
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.source, self.chunk_index)
    }
}

/// A single text chunk from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The actual text content
    pub text: String,

    /// Source document name
    pub source: String,

    /// Character offset where the chunk starts in the text block
    pub start_offset: usize,

    /// Length of the chunk in characters
    pub length: usize,

    /// Sequential chunk number within the document
    pub chunk_index: usize,
}

impl Chunk {
    /// Identity used for deduplication across queries
    pub fn id(&self) -> ChunkId {
        ChunkId {
            source: self.source.clone(),
            chunk_index: self.chunk_index,
        }
    }

    /// Character offset one past the last character
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.length
    }
}

/// Search hit returned by the vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,

    /// Cosine similarity (higher = more relevant)
    pub score: f32,
}

/// One merged retrieval hit with the query that first found it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub chunk: Chunk,
    pub score: f32,
    pub query: String,
}

/// Ordered, deduplicated chunks retrieved for one question
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Original question
    pub question: String,

    /// Queries actually issued (original first)
    pub queries: Vec<String>,

    /// Merged hits, stable order
    pub chunks: Vec<RetrievedChunk>,
}

impl RetrievalResult {
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }
}

/// Reference to a chunk an answer was grounded on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub source: String,
    pub chunk_index: usize,
    pub start_offset: usize,
    pub length: usize,
    pub score: f32,
    pub query: String,
}

impl From<&RetrievedChunk> for SourceRef {
    fn from(hit: &RetrievedChunk) -> Self {
        Self {
            source: hit.chunk.source.clone(),
            chunk_index: hit.chunk.chunk_index,
            start_offset: hit.chunk.start_offset,
            length: hit.chunk.length,
            score: hit.score,
            query: hit.query.clone(),
        }
    }
}

/// Answer produced for one question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Model output
    pub text: String,

    /// Queries issued during retrieval
    pub queries: Vec<String>,

    /// Chunks placed in the prompt context
    pub sources: Vec<SourceRef>,

    /// Wall-clock time in milliseconds
    pub duration_ms: u64,
}

/// Result of a successful ingest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexReady {
    /// Source document name
    pub source: String,

    /// Characters of extracted text
    pub text_chars: usize,

    /// Chunks embedded and stored
    pub chunks_created: usize,

    /// Embedding dimensions (0 for an empty document)
    pub dimensions: usize,

    /// Collection directory
    pub storage_path: PathBuf,

    /// Ingest duration in milliseconds
    pub duration_ms: u64,
}

/// Lifecycle state of the single index slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStatus {
    Empty,
    Building,
    Ready,
    Destroying,
}

impl fmt::Display for IndexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IndexStatus::Empty => "empty",
            IndexStatus::Building => "building",
            IndexStatus::Ready => "ready",
            IndexStatus::Destroying => "destroying",
        };
        f.write_str(s)
    }
}

/// Conversation role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
