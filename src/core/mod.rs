//! Core domain logic (presentation-agnostic)
//!
//! This module contains the whole RAG engine, independent of how it
//! is presented (CLI, chat loop, tests).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **ingest**: Text extraction, chunking, staging
//! - **providers**: Embedding and language model backends
//! - **storage**: Persisted vector collection
//! - **search**: Query expansion and multi-query retrieval
//! - **synthesizer**: Grounded answer generation
//! - **lifecycle**: Index state machine and readers-writer gate
//! - **services**: `RagService` facade
//! - **session**: Conversation history around the facade

pub mod config;
pub mod error;
pub mod ingest;
pub mod lifecycle;
pub mod providers;
pub mod search;
pub mod services;
pub mod session;
pub mod storage;
pub mod synthesizer;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{DocRagError, Result};
pub use services::RagService;
pub use session::ChatSession;
