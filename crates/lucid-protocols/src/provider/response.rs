//! Completion response types.

use serde::{Deserialize, Serialize};

use crate::types::{Message, StopReason, Usage};

/// Response from a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Unique ID for this completion.
    pub id: String,

    /// Model used.
    pub model: String,

    /// The assistant's response message.
    pub message: Message,

    /// Reason for stopping.
    pub stop_reason: StopReason,

    /// Token usage.
    pub usage: Usage,
}

impl CompletionResponse {
    /// Trimmed text of the reply, `None` when the model returned nothing.
    pub fn text(&self) -> Option<&str> {
        let text = self.message.content.trim();
        if text.is_empty() { None } else { Some(text) }
    }
}
