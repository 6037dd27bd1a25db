//! Multi-query expansion.
//!
//! Asks the language model for alternative phrasings of a question so
//! that retrieval is less sensitive to wording. Expansion never fails:
//! any problem falls back to the original question alone.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::config::RetrievalConfig;
use crate::core::providers::LanguageModel;

/// Default number of alternative phrasings
pub const DEFAULT_QUERY_VARIANTS: usize = 3;

// Leading "1.", "2)", "-", "*" or "•"
static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\d+[.)]|[-*•])\s*").unwrap());

/// Generates query variants with a language model
#[derive(Debug, Clone)]
pub struct QueryExpander {
    variants: usize,
    temperature: f32,
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_VARIANTS, 0.0)
    }
}

impl QueryExpander {
    pub fn new(variants: usize, temperature: f32) -> Self {
        Self {
            variants,
            temperature,
        }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(config.query_variants, config.expansion_temperature)
    }

    pub fn variants(&self) -> usize {
        self.variants
    }

    /// Prompt sent to the model
    pub fn prompt(&self, question: &str) -> String {
        format!(
            "You are an AI language model assistant. Your task is to generate {} \
             different versions of the given user question to retrieve relevant documents from \
             a vector database. By generating multiple perspectives on the user question, your \
             goal is to help the user overcome some of the limitations of the distance-based \
             similarity search. Provide these alternative questions separated by newlines.\n\
             Original question: {}",
            self.variants, question
        )
    }

    /// Split model output into candidate questions.
    ///
    /// Blank lines are dropped and list markers stripped.
    pub fn parse_variants(output: &str) -> Vec<String> {
        output
            .lines()
            .map(|line| LIST_MARKER.replace(line, "").trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Expand a question into `{question} ∪ variants`.
    ///
    /// The original question is always first and duplicates are removed
    /// preserving order. If the model fails or returns a different
    /// number of variants than requested, only the original is returned.
    pub fn expand(&self, question: &str, llm: &dyn LanguageModel) -> Vec<String> {
        let original = vec![question.to_string()];
        if self.variants == 0 {
            return original;
        }

        let output = match llm.generate(&self.prompt(question), self.temperature) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("Query expansion failed, using original question: {}", e);
                return original;
            }
        };

        let variants = Self::parse_variants(&output);
        if variants.len() != self.variants {
            tracing::warn!(
                "Query expansion returned {} variants (expected {}), using original question",
                variants.len(),
                self.variants
            );
            return original;
        }

        let mut queries = original;
        for variant in variants {
            if !queries.contains(&variant) {
                queries.push(variant);
            }
        }

        tracing::debug!("Expanded into {} queries: {:?}", queries.len(), queries);
        queries
    }
}
