//! Model provider interfaces.
//!
//! The core only talks to embedding and language models through the
//! traits in this module. Concrete backends:
//!
//! - **ollama**: HTTP client for a local Ollama server
//! - **hashing**: offline, deterministic feature-hashing embedder
//!
//! All calls are blocking. Failures surface as
//! [`DocRagError::ProviderUnavailable`].

pub mod hashing;
pub mod ollama;

use std::sync::Arc;

use crate::core::config::{EmbeddingBackend, ProvidersConfig};
use crate::core::error::{DocRagError, Result};

pub use hashing::HashingEmbedder;
pub use ollama::OllamaClient;

/// Maps text to fixed-length vectors
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| DocRagError::provider(self.model_id(), "empty embedding response"))
    }

    /// Embed many texts, one vector per input in input order
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Identifier recorded in collection metadata
    fn model_id(&self) -> String;
}

/// Text-in, text-out language model
pub trait LanguageModel: Send + Sync {
    fn generate(&self, prompt: &str, temperature: f32) -> Result<String>;

    fn model_id(&self) -> String;
}

/// Lists models installed on a provider
pub trait ModelCatalog: Send + Sync {
    fn list_models(&self) -> Result<Vec<String>>;
}

/// Build the configured embedding backend
pub fn build_embedder(config: &ProvidersConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    match config.embedding_backend {
        EmbeddingBackend::Ollama => {
            let client = OllamaClient::new(
                &config.ollama_url,
                &config.embedding_model,
                config.request_timeout_sec,
            )?;
            Ok(Arc::new(client))
        }
        EmbeddingBackend::Hashing => Ok(Arc::new(HashingEmbedder::new(config.hashing_dimensions)?)),
    }
}

/// Build the chat model client, optionally overriding the model name
pub fn build_language_model(
    config: &ProvidersConfig,
    model: Option<&str>,
) -> Result<Arc<dyn LanguageModel>> {
    let model = model.unwrap_or(&config.chat_model);
    let client = OllamaClient::new(&config.ollama_url, model, config.request_timeout_sec)?;
    Ok(Arc::new(client))
}

/// Build a catalog for the configured Ollama server
pub fn build_catalog(config: &ProvidersConfig) -> Result<Arc<dyn ModelCatalog>> {
    let client = OllamaClient::new(
        &config.ollama_url,
        &config.chat_model,
        config.request_timeout_sec,
    )?;
    Ok(Arc::new(client))
}
