//! Elaboration session model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::SpecificationState;

/// Author of a transcript message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
    User,
}

/// One entry of the conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: Timestamp,
}

impl TranscriptMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Timestamp::now(),
        }
    }
}

/// Conversation state for one seed, reusable across interruptions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElaborationSession {
    /// Seed this session elaborates
    pub seed_id: u64,

    /// The specification being filled in
    pub state: SpecificationState,

    /// Ordered conversation history
    #[serde(default)]
    pub transcript: Vec<TranscriptMessage>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ElaborationSession {
    /// Session identifier, assigned when the session starts.
    pub fn session_id(&self) -> Option<&str> {
        self.state.session_id.as_deref()
    }

    /// Whether every question has been asked or answered.
    pub fn is_complete(&self) -> bool {
        self.state.cursor >= crate::elaboration::QUESTIONS.len()
    }
}
