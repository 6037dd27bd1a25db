//! Configuration management for docrag.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{DocRagError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Ingestion configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    /// Characters per chunk (not bytes!)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Character overlap between consecutive chunks
    #[serde(default = "default_overlap")]
    pub overlap: usize,

    /// Maximum document size in MB
    #[serde(default = "default_max_document_size")]
    pub max_document_size_mb: usize,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the single collection
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Logical collection name
    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    /// Extra attempts after a failed cleanup
    #[serde(default = "default_cleanup_retries")]
    pub cleanup_retries: u32,

    /// Delay before the first cleanup retry
    #[serde(default = "default_cleanup_retry_delay_ms")]
    pub cleanup_retry_delay_ms: u64,

    /// Multiplier applied to the delay after each retry
    #[serde(default = "default_cleanup_backoff_factor")]
    pub cleanup_backoff_factor: f64,
}

/// Retrieval configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// Results fetched per expanded query
    #[serde(default = "default_k_per_query")]
    pub k_per_query: usize,

    /// Alternative phrasings requested from the model
    #[serde(default = "default_query_variants")]
    pub query_variants: usize,

    /// Sampling temperature for query expansion
    #[serde(default)]
    pub expansion_temperature: f32,
}

/// Answer generation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Sampling temperature for the answer (0 = deterministic)
    #[serde(default)]
    pub temperature: f32,

    /// Upper bound on context characters in the prompt (0 = unlimited)
    #[serde(default)]
    pub max_context_chars: usize,
}

/// Embedding backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Ollama `/api/embed`
    Ollama,
    /// Offline feature hashing
    Hashing,
}

impl std::str::FromStr for EmbeddingBackend {
    type Err = DocRagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "hashing" => Ok(Self::Hashing),
            other => Err(DocRagError::ConfigError(format!(
                "Unknown embedding backend '{other}' (expected 'ollama' or 'hashing')"
            ))),
        }
    }
}

/// Provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    /// Ollama server base URL
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Embedding backend
    #[serde(default = "default_embedding_backend")]
    pub embedding_backend: EmbeddingBackend,

    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Chat model name
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Vector size for the hashing backend
    #[serde(default = "default_hashing_dimensions")]
    pub hashing_dimensions: usize,

    /// HTTP timeout; unset means wait indefinitely
    #[serde(default)]
    pub request_timeout_sec: Option<u64>,
}

// Default value functions
fn default_chunk_size() -> usize {
    7500
}

fn default_overlap() -> usize {
    100
}

fn default_max_document_size() -> usize {
    50
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_collection_name() -> String {
    "myRAG".to_string()
}

fn default_cleanup_retries() -> u32 {
    1
}

fn default_cleanup_retry_delay_ms() -> u64 {
    500
}

fn default_cleanup_backoff_factor() -> f64 {
    2.0
}

fn default_k_per_query() -> usize {
    4
}

fn default_query_variants() -> usize {
    3
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_backend() -> EmbeddingBackend {
    EmbeddingBackend::Ollama
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_chat_model() -> String {
    "llama3.2".to_string()
}

fn default_hashing_dimensions() -> usize {
    384
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
            max_document_size_mb: default_max_document_size(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
            collection_name: default_collection_name(),
            cleanup_retries: default_cleanup_retries(),
            cleanup_retry_delay_ms: default_cleanup_retry_delay_ms(),
            cleanup_backoff_factor: default_cleanup_backoff_factor(),
        }
    }
}

impl StorageConfig {
    /// Delay before the first cleanup retry
    pub fn cleanup_retry_delay(&self) -> Duration {
        Duration::from_millis(self.cleanup_retry_delay_ms)
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            k_per_query: default_k_per_query(),
            query_variants: default_query_variants(),
            expansion_temperature: 0.0,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_context_chars: 0,
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            ollama_url: default_ollama_url(),
            embedding_backend: default_embedding_backend(),
            embedding_model: default_embedding_model(),
            chat_model: default_chat_model(),
            hashing_dimensions: default_hashing_dimensions(),
            request_timeout_sec: None,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| DocRagError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. DOCRAG_CONFIG env var
    /// 2. XDG config file (~/.config/docrag/config.toml)
    /// 3. ./docrag.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("DOCRAG_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("docrag.toml").exists() {
                Self::from_file("docrag.toml")?
            } else {
                Self::default()
            }
        };

        // Use the XDG data directory unless a path was set explicitly
        if env::var("DOCRAG_DATA_DIR").is_err() && config.storage.index_dir == default_index_dir()
        {
            config.storage.index_dir = xdg.index_dir();
        }

        config.merge_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) -> Result<()> {
        if let Ok(chunk_size) = env::var("DOCRAG_CHUNK_SIZE") {
            if let Ok(size) = chunk_size.parse() {
                self.ingest.chunk_size = size;
            }
        }
        if let Ok(overlap) = env::var("DOCRAG_OVERLAP") {
            if let Ok(o) = overlap.parse() {
                self.ingest.overlap = o;
            }
        }

        if let Ok(data_dir) = env::var("DOCRAG_DATA_DIR") {
            self.storage.index_dir = PathBuf::from(data_dir).join("vector_db");
        }

        if let Ok(k) = env::var("DOCRAG_K_PER_QUERY") {
            if let Ok(k) = k.parse() {
                self.retrieval.k_per_query = k;
            }
        }

        if let Ok(url) = env::var("DOCRAG_OLLAMA_URL") {
            self.providers.ollama_url = url;
        }
        if let Ok(model) = env::var("DOCRAG_EMBEDDING_MODEL") {
            self.providers.embedding_model = model;
        }
        if let Ok(model) = env::var("DOCRAG_CHAT_MODEL") {
            self.providers.chat_model = model;
        }
        if let Ok(backend) = env::var("DOCRAG_EMBEDDING_BACKEND") {
            self.providers.embedding_backend = backend.parse()?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ingest.chunk_size == 0 {
            return Err(DocRagError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.ingest.overlap >= self.ingest.chunk_size {
            return Err(DocRagError::ConfigError(
                "Overlap must be less than chunk size".to_string(),
            ));
        }

        if self.ingest.max_document_size_mb == 0 {
            return Err(DocRagError::ConfigError(
                "Max document size must be non-zero".to_string(),
            ));
        }

        if self.storage.collection_name.trim().is_empty() {
            return Err(DocRagError::ConfigError(
                "Collection name cannot be empty".to_string(),
            ));
        }

        if !(self.storage.cleanup_backoff_factor >= 1.0) {
            return Err(DocRagError::ConfigError(
                "Cleanup backoff factor must be >= 1.0".to_string(),
            ));
        }

        if self.retrieval.k_per_query == 0 {
            return Err(DocRagError::ConfigError(
                "k per query must be non-zero".to_string(),
            ));
        }

        if self.retrieval.query_variants == 0 {
            return Err(DocRagError::ConfigError(
                "Query variants must be non-zero".to_string(),
            ));
        }

        for (name, value) in [
            ("Expansion temperature", self.retrieval.expansion_temperature),
            ("Generation temperature", self.generation.temperature),
        ] {
            if !(value >= 0.0) {
                return Err(DocRagError::ConfigError(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }

        if self.providers.embedding_backend == EmbeddingBackend::Hashing
            && self.providers.hashing_dimensions == 0
        {
            return Err(DocRagError::ConfigError(
                "Hashing dimensions must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Chunk size: {} chars", self.ingest.chunk_size);
        tracing::info!("  Overlap: {} chars", self.ingest.overlap);
        tracing::info!("  Index dir: {:?}", self.storage.index_dir);
        tracing::info!("  Collection: {}", self.storage.collection_name);
        tracing::info!(
            "  Cleanup retries: {} (initial delay {}ms, x{})",
            self.storage.cleanup_retries,
            self.storage.cleanup_retry_delay_ms,
            self.storage.cleanup_backoff_factor
        );
        tracing::info!("  k per query: {}", self.retrieval.k_per_query);
        tracing::info!("  Query variants: {}", self.retrieval.query_variants);
        tracing::info!("  Ollama URL: {}", self.providers.ollama_url);
        tracing::info!(
            "  Embedding: {:?} ({})",
            self.providers.embedding_backend,
            self.providers.embedding_model
        );
        tracing::info!("  Chat model: {}", self.providers.chat_model);
    }
}
