//! Answer synthesis from retrieved context.

use crate::core::config::GenerationConfig;
use crate::core::error::{DocRagError, Result};
use crate::core::providers::LanguageModel;
use crate::core::types::{RetrievalResult, RetrievedChunk};

/// Builds the grounded prompt and makes the single answer call
#[derive(Debug, Clone, Default)]
pub struct AnswerSynthesizer {
    temperature: f32,
    max_context_chars: usize,
}

impl AnswerSynthesizer {
    /// `max_context_chars == 0` means no context budget
    pub fn new(temperature: f32, max_context_chars: usize) -> Self {
        Self {
            temperature,
            max_context_chars,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.temperature, config.max_context_chars)
    }

    /// Chunks that fit the context budget, in retrieval order.
    ///
    /// Whole chunks only; the first chunk is always kept.
    pub fn select_context<'a>(&self, retrieval: &'a RetrievalResult) -> &'a [RetrievedChunk] {
        if self.max_context_chars == 0 {
            return &retrieval.chunks;
        }

        let mut used = 0;
        let mut count = 0;
        for hit in &retrieval.chunks {
            let size = hit.chunk.text.chars().count();
            if count > 0 && used + size > self.max_context_chars {
                break;
            }
            used += size;
            count += 1;
        }

        if count < retrieval.chunks.len() {
            tracing::debug!(
                "Context budget {} chars: using {} of {} chunks",
                self.max_context_chars,
                count,
                retrieval.chunks.len()
            );
        }
        &retrieval.chunks[..count]
    }

    /// Render the answer prompt
    pub fn prompt(question: &str, context: &[RetrievedChunk]) -> String {
        let context = context
            .iter()
            .map(|hit| hit.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "Answer the question based ONLY on the following context:\n\
             {context}\n\
             Question: {question}\n\
             If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\
             Only provide the answer from the context above, nothing else.\n\
             Add snippets of the context you used to answer the question."
        )
    }

    /// Generate an answer; returns the text and the chunks it was given.
    ///
    /// Snippets quoted by the model are not verified against the context.
    pub fn answer<'a>(
        &self,
        retrieval: &'a RetrievalResult,
        llm: &dyn LanguageModel,
    ) -> Result<(String, &'a [RetrievedChunk])> {
        let context = self.select_context(retrieval);
        let prompt = Self::prompt(&retrieval.question, context);

        tracing::debug!(
            "Synthesizing answer with {} ({} context chunks)",
            llm.model_id(),
            context.len()
        );

        let text = llm
            .generate(&prompt, self.temperature)
            .map_err(|e| DocRagError::SynthesisError(e.to_string()))?;

        Ok((text, context))
    }
}
