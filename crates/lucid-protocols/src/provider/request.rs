//! Completion request types.

use serde::{Deserialize, Serialize};

use crate::types::Message;

/// One call to a provider: a model, the prompt, and sampling limits.
///
/// Every relay prompt is a single user turn plus an optional system
/// instruction; see [`CompletionRequest::single_turn`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,

    pub messages: Vec<Message>,

    /// Providers without a system role fold this into the first turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Output budget; the relay's key check uses 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// 0.0 - 2.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            system: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
        }
    }

    /// Request with a single user message.
    pub fn single_turn(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(model, vec![Message::user(prompt)])
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Text of the last user message, if any.
    pub fn prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == crate::types::MessageRole::User)
            .map(|m| m.content.as_str())
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
