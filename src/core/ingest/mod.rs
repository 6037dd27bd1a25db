//! Document ingestion module.
//!
//! Turns an uploaded document into chunks ready for embedding:
//!
//! - Text extraction (PDF via `pdf-extract`, UTF-8 text files)
//! - UTF-8 safe character-based chunking with fixed overlap
//! - Pipeline orchestration with scoped staging storage
//!
//! # Safety
//!
//! The chunker slices only on `char_indices()` boundaries, so
//! documents containing emojis or other multi-byte characters can
//! never cause a panic.

pub mod chunker;
pub mod extractor;
pub mod pipeline;

pub use chunker::Chunker;
pub use extractor::{ExtractorRegistry, PdfExtractor, PlainTextExtractor, TextExtractor};
pub use pipeline::{IngestPipeline, PreparedDocument};
