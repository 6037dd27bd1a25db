//! Offline feature-hashing embedder.
//!
//! Lower-cased alphanumeric tokens are hashed (xxHash64, seed 0) into a fixed
//! number of buckets with a hash-derived sign, then the vector is
//! L2-normalised. Deterministic across runs and platforms, needs no
//! model server, and keeps lexical overlap meaningful under cosine
//! similarity.

use std::hash::Hasher;

use twox_hash::XxHash64;

use crate::core::error::{DocRagError, Result};
use crate::core::providers::EmbeddingProvider;

/// Fixed seed, so vectors are stable across runs
const SEED: u64 = 0;

fn token_hash(token: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(SEED);
    hasher.write(token.as_bytes());
    hasher.finish()
}

/// Deterministic bag-of-words embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(DocRagError::ConfigError(
                "hashing_dimensions must be > 0".to_string(),
            ));
        }
        Ok(Self { dimensions })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        let lowered = text.to_lowercase();
        for token in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = token_hash(token);
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }
}

impl EmbeddingProvider for HashingEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn model_id(&self) -> String {
        format!("hashing-{}", self.dimensions)
    }
}
