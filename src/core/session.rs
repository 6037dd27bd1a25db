//! Conversation session around a [`RagService`].
//!
//! History is presentation state only: questions are answered
//! independently and earlier turns are never sent to the model.

use std::sync::Arc;

use crate::core::error::Result;
use crate::core::services::RagService;
use crate::core::types::{Answer, ConversationTurn, Document, IndexReady, IndexStatus};

/// Ordered user/assistant turns
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

/// One user's conversation with the shared service
pub struct ChatSession {
    service: Arc<RagService>,
    history: ConversationHistory,
}

impl ChatSession {
    pub fn new(service: Arc<RagService>) -> Self {
        Self {
            service,
            history: ConversationHistory::new(),
        }
    }

    pub fn service(&self) -> &RagService {
        &self.service
    }

    pub fn ingest(&self, document: &Document) -> Result<IndexReady> {
        self.service.ingest(document)
    }

    /// Ask a question, recording the exchange.
    ///
    /// The user turn is recorded first; the assistant turn only when an
    /// answer was produced.
    pub fn ask(&mut self, question: &str) -> Result<Answer> {
        self.history.push(ConversationTurn::user(question));

        let answer = self.service.ask(question)?;
        self.history
            .push(ConversationTurn::assistant(answer.text.clone()));
        Ok(answer)
    }

    /// Delete the collection and clear history
    pub fn reset(&mut self) -> Result<()> {
        self.history.clear();
        self.service.reset()
    }

    pub fn status(&self) -> IndexStatus {
        self.service.status()
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        self.history.turns()
    }
}
