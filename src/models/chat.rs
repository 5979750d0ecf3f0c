// Chat history types for streamed conversations

use crate::models::gemini::{Content, Part};
use serde::{Deserialize, Serialize};

/// One turn of conversation history, ordered oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// "user" or "model".
    pub role: String,
    /// Message fragments for the turn (usually a single string).
    pub parts: Vec<String>,
}

impl ChatTurn {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![message.into()],
        }
    }

    pub fn model(message: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![message.into()],
        }
    }
}

impl From<&ChatTurn> for Content {
    fn from(turn: &ChatTurn) -> Self {
        Content {
            role: turn.role.clone(),
            parts: turn.parts.iter().map(|p| Part::text(p.clone())).collect(),
        }
    }
}
