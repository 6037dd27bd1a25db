//! docrag - single-document retrieval-augmented generation
//!
//! Ingest one document (PDF or UTF-8 text) into a local vector
//! collection, then answer questions grounded only in that document
//! using locally hosted models.
//!
//! # Architecture
//!
//! The codebase is organized into two modules:
//!
//! - **core**: RAG engine (presentation-agnostic)
//!   - config, error, types, xdg
//!   - ingest (extraction, chunking, staging)
//!   - providers (Ollama, offline hashing embedder)
//!   - storage (persisted vector collection, cleanup retries)
//!   - search (query expansion, multi-query retrieval)
//!   - synthesizer, lifecycle, services, session
//!
//! - **cli**: command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - UTF-8 safe chunking (character-based, never panics)
//! - Multi-query retrieval with set-union deduplication
//! - Single collection with an explicit lifecycle state machine
//! - All-or-nothing builds (staging directory + rename)
//! - Answers grounded only in retrieved context

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{DocRagError, Result};
pub use crate::core::services::RagService;
pub use crate::core::session::{ChatSession, ConversationHistory};
pub use crate::core::types::*;
