//! Error types and error handling for docrag.
//!
//! Every failure the RAG core can report is a variant of
//! [`DocRagError`]. Presentation adapters (the CLI) map these to
//! user-facing messages; none of them is fatal to the process.

use thiserror::Error;

/// Result type alias for docrag operations
pub type Result<T> = std::result::Result<T, DocRagError>;

/// Main error type for the RAG core
#[derive(Error, Debug)]
pub enum DocRagError {
    #[error("Extraction failed for '{document}': {reason}")]
    Extraction { document: String, reason: String },

    #[error("Provider unavailable ({provider}): {reason}")]
    ProviderUnavailable { provider: String, reason: String },

    #[error("Index not ready: {0}")]
    IndexNotReady(String),

    #[error("Index is being built: {0}")]
    IndexBuilding(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Answer synthesis failed: {0}")]
    SynthesisError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Corrupt collection: {0}")]
    CorruptCollection(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl DocRagError {
    /// Build an extraction error for the named document
    pub fn extraction(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Extraction {
            document: document.into(),
            reason: reason.into(),
        }
    }

    /// Build a provider error for the named backend
    pub fn provider(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Stable machine-readable error kind, used in JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            DocRagError::Extraction { .. } => "extraction_error",
            DocRagError::ProviderUnavailable { .. } => "provider_unavailable",
            DocRagError::IndexNotReady(_) => "index_not_ready",
            DocRagError::IndexBuilding(_) => "index_building",
            DocRagError::StorageError(_) => "storage_error",
            DocRagError::SynthesisError(_) => "synthesis_error",
            DocRagError::ConfigError(_) => "config_error",
            DocRagError::InvalidQuery(_) => "invalid_query",
            DocRagError::DimensionMismatch { .. } => "dimension_mismatch",
            DocRagError::CorruptCollection(_) => "corrupt_collection",
            DocRagError::IoError(_) => "io_error",
            DocRagError::SerdeError(_) => "serialization_error",
            DocRagError::TomlError(_) => "toml_error",
        }
    }

    /// Check if retrying the whole operation later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DocRagError::ProviderUnavailable { .. }
                | DocRagError::IndexBuilding(_)
                | DocRagError::StorageError(_)
                | DocRagError::SynthesisError(_)
        )
    }

    /// Check if the user can fix this (re-upload, ingest first, rephrase)
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            DocRagError::Extraction { .. }
                | DocRagError::IndexNotReady(_)
                | DocRagError::InvalidQuery(_)
                | DocRagError::ConfigError(_)
        )
    }
}
