//! UTF-8 safe sliding-window chunking.
//!
//! Splits a [`TextBlock`] into fixed-size, overlapping chunks. All
//! sizes and offsets are measured in **characters**, not bytes, so a
//! boundary can never fall inside a multi-byte UTF-8 sequence.
//! Boundaries deliberately ignore words and tokens.
//!
//! # Example
//!
//! ```
//! use docrag::core::ingest::Chunker;
//! use docrag::core::types::TextBlock;
//!
//! let chunker = Chunker::new(10, 2).unwrap();
//! let block = TextBlock::new("test.txt", "Hello 👋 World 🌍 Rust 🦀");
//! let chunks = chunker.split(&block);
//!
//! assert!(chunks.len() > 1);
//! assert!(chunks.iter().all(|c| c.length <= 10));
//! ```

use crate::core::error::{DocRagError, Result};
use crate::core::types::{Chunk, TextBlock};

/// Default maximum chunk length in characters
pub const DEFAULT_CHUNK_SIZE: usize = 7500;

/// Default overlap between consecutive chunks in characters
pub const DEFAULT_OVERLAP: usize = 100;

/// UTF-8 safe text chunker.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Number of characters per chunk
    chunk_size: usize,

    /// Number of characters shared by consecutive chunks
    overlap: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl Chunker {
    /// Create a new chunker with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DocRagError::ConfigError`] if `chunk_size` is 0 or
    /// if `overlap >= chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(DocRagError::ConfigError(
                "chunk_size must be > 0".to_string(),
            ));
        }
        if overlap >= chunk_size {
            return Err(DocRagError::ConfigError(format!(
                "overlap ({overlap}) must be < chunk_size ({chunk_size})"
            )));
        }

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Get the chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the overlap size in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split a text block into overlapping chunks.
    ///
    /// Deterministic: the same input always yields the same sequence.
    /// Empty text yields no chunks; text no longer than `chunk_size`
    /// yields exactly one. Every chunk except the last is exactly
    /// `chunk_size` characters long and consecutive chunks share
    /// exactly `overlap` characters.
    pub fn split(&self, block: &TextBlock) -> Vec<Chunk> {
        let text = block.text.as_str();

        // (byte offset, char) pairs; we only ever slice on these
        let char_indices: Vec<(usize, char)> = text.char_indices().collect();
        let total_chars = char_indices.len();

        if total_chars == 0 {
            return Vec::new();
        }

        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::with_capacity(total_chars / step + 1);
        let mut char_start = 0;

        loop {
            let char_end = (char_start + self.chunk_size).min(total_chars);

            let byte_start = char_indices[char_start].0;
            let byte_end = if char_end < total_chars {
                char_indices[char_end].0
            } else {
                text.len()
            };

            chunks.push(Chunk {
                text: text[byte_start..byte_end].to_string(),
                source: block.source.clone(),
                start_offset: char_start,
                length: char_end - char_start,
                chunk_index: chunks.len(),
            });

            // A further window would lie entirely inside this one
            if char_end == total_chars {
                break;
            }
            char_start += step;
        }

        chunks
    }
}
