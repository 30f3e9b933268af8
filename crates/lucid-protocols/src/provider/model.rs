//! Model definition types.

use serde::{Deserialize, Serialize};

/// Definition of an LLM model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Model identifier.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Maximum context length in tokens.
    pub context_length: u32,

    /// Maximum output tokens.
    pub max_output_tokens: u32,
}

impl ModelDefinition {
    /// Create a new model definition.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            context_length: 16_385,
            max_output_tokens: 4096,
        }
    }

    /// Set context length.
    pub fn with_context_length(mut self, length: u32) -> Self {
        self.context_length = length;
        self
    }

    /// Set max output tokens.
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_definition_new() {
        let model = ModelDefinition::new("gpt-3.5-turbo", "GPT-3.5 Turbo");
        assert_eq!(model.id, "gpt-3.5-turbo");
        assert_eq!(model.context_length, 16_385);
        assert_eq!(model.max_output_tokens, 4096);
    }

    #[test]
    fn test_model_definition_builder_chain() {
        let model = ModelDefinition::new("gemini-1.5-flash", "Gemini 1.5 Flash")
            .with_context_length(1_000_000)
            .with_max_output_tokens(8192);
        assert_eq!(model.context_length, 1_000_000);
        assert_eq!(model.max_output_tokens, 8192);
    }
}
