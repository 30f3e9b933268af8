//! Common utility types.

use serde::{Deserialize, Serialize};

/// Stop reason for a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    StopSequence,
    MaxTokens,
    ContentFilter,
}

impl StopReason {
    /// Map a provider finish reason string (OpenAI or Gemini spelling).
    pub fn from_finish_reason(reason: Option<&str>) -> Self {
        match reason {
            Some("length") | Some("MAX_TOKENS") => Self::MaxTokens,
            Some("STOP_SEQUENCE") => Self::StopSequence,
            Some("content_filter") | Some("SAFETY") => Self::ContentFilter,
            _ => Self::EndTurn,
        }
    }
}

/// Usage information for a completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
