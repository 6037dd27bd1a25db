//! Ollama HTTP client.
//!
//! Implements [`EmbeddingProvider`], [`LanguageModel`] and
//! [`ModelCatalog`] against a local Ollama server:
//!
//! - `POST /api/embed` for batch embeddings
//! - `POST /api/generate` for non-streaming completions
//! - `GET /api/tags` for installed models

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::core::error::{DocRagError, Result};
use crate::core::providers::{EmbeddingProvider, LanguageModel, ModelCatalog};

const PROVIDER: &str = "ollama";

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Blocking client bound to one Ollama server and one model
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a client.
    ///
    /// No request timeout is applied unless `timeout_sec` is set.
    pub fn new(base_url: &str, model: &str, timeout_sec: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder().timeout(None::<Duration>);
        if let Some(secs) = timeout_sec {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| DocRagError::provider(PROVIDER, format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a transport result into a checked response
    fn check(&self, path: &str, result: reqwest::Result<Response>) -> Result<Response> {
        let response = result.map_err(|e| {
            DocRagError::provider(PROVIDER, format!("request to {} failed: {e}", self.endpoint(path)))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);

        Err(DocRagError::provider(
            PROVIDER,
            format!("{path} returned {status}: {}", detail.trim()),
        ))
    }

    fn decode<T: for<'de> Deserialize<'de>>(path: &str, response: Response) -> Result<T> {
        response
            .json::<T>()
            .map_err(|e| DocRagError::provider(PROVIDER, format!("invalid {path} response: {e}")))
    }
}

impl EmbeddingProvider for OllamaClient {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let path = "/api/embed";
        tracing::debug!("Embedding {} texts with {}", texts.len(), self.model);

        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };
        let response = self.check(path, self.client.post(self.endpoint(path)).json(&request).send())?;
        let body: EmbedResponse = Self::decode(path, response)?;

        if body.embeddings.len() != texts.len() {
            return Err(DocRagError::provider(
                PROVIDER,
                format!(
                    "expected {} embeddings, got {}",
                    texts.len(),
                    body.embeddings.len()
                ),
            ));
        }

        Ok(body.embeddings)
    }

    fn model_id(&self) -> String {
        format!("{PROVIDER}/{}", self.model)
    }
}

impl LanguageModel for OllamaClient {
    fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
        let path = "/api/generate";
        tracing::debug!(
            "Generating with {} ({} prompt chars, temperature {})",
            self.model,
            prompt.chars().count(),
            temperature
        );

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions { temperature },
        };
        let response = self.check(path, self.client.post(self.endpoint(path)).json(&request).send())?;
        let body: GenerateResponse = Self::decode(path, response)?;

        Ok(body.response)
    }

    fn model_id(&self) -> String {
        format!("{PROVIDER}/{}", self.model)
    }
}

impl ModelCatalog for OllamaClient {
    fn list_models(&self) -> Result<Vec<String>> {
        let path = "/api/tags";
        let response = self.check(path, self.client.get(self.endpoint(path)).send())?;
        let body: TagsResponse = Self::decode(path, response)?;

        Ok(body.models.into_iter().map(|m| m.name).collect())
    }
}
