//! Multi-query retrieval with set-union merging.

use std::collections::HashSet;

use crate::core::config::RetrievalConfig;
use crate::core::error::{DocRagError, Result};
use crate::core::providers::{EmbeddingProvider, LanguageModel};
use crate::core::search::expander::QueryExpander;
use crate::core::storage::VectorIndex;
use crate::core::types::{RetrievalResult, RetrievedChunk};

/// Default results fetched per query
pub const DEFAULT_K_PER_QUERY: usize = 4;

/// Expands a question, searches once per query and merges the hits
#[derive(Debug, Clone)]
pub struct Retriever {
    expander: QueryExpander,
    k_per_query: usize,
}

impl Default for Retriever {
    fn default() -> Self {
        Self::new(QueryExpander::default(), DEFAULT_K_PER_QUERY)
    }
}

impl Retriever {
    pub fn new(expander: QueryExpander, k_per_query: usize) -> Self {
        Self {
            expander,
            k_per_query,
        }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(QueryExpander::from_config(config), config.k_per_query)
    }

    pub fn k_per_query(&self) -> usize {
        self.k_per_query
    }

    /// Retrieve context for `question`.
    ///
    /// Fails with [`DocRagError::IndexNotReady`] before any model call
    /// when `index` is `None`. Merged order is query order (original
    /// first), then rank within each query; each chunk appears once,
    /// tagged with the first query that found it.
    pub fn retrieve(
        &self,
        question: &str,
        index: Option<&VectorIndex>,
        embedder: &dyn EmbeddingProvider,
        llm: &dyn LanguageModel,
    ) -> Result<RetrievalResult> {
        let index = index.ok_or_else(|| {
            DocRagError::IndexNotReady("no document has been ingested".to_string())
        })?;

        let queries = self.expander.expand(question, llm);
        let vectors = embedder.embed_batch(&queries)?;
        if vectors.len() != queries.len() {
            return Err(DocRagError::provider(
                embedder.model_id(),
                format!("expected {} vectors, got {}", queries.len(), vectors.len()),
            ));
        }

        let mut seen = HashSet::new();
        let mut chunks = Vec::new();

        for (query, vector) in queries.iter().zip(&vectors) {
            let hits = index.search(vector, self.k_per_query)?;
            tracing::debug!("Query {:?} matched {} chunks", query, hits.len());

            for hit in hits {
                if seen.insert(hit.chunk.id()) {
                    chunks.push(RetrievedChunk {
                        chunk: hit.chunk,
                        score: hit.score,
                        query: query.clone(),
                    });
                }
            }
        }

        tracing::info!(
            "Retrieved {} unique chunks for {} queries",
            chunks.len(),
            queries.len()
        );

        Ok(RetrievalResult {
            question: question.to_string(),
            queries,
            chunks,
        })
    }
}
