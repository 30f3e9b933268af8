//! OpenAI model definitions.

use lucid_protocols::provider::ModelDefinition;

/// Chat models the relay is known to work with.
pub fn get_models() -> Vec<ModelDefinition> {
    vec![
        ModelDefinition::new("gpt-3.5-turbo", "GPT-3.5 Turbo")
            .with_context_length(16_385)
            .with_max_output_tokens(4096),
        ModelDefinition::new("gpt-4o-mini", "GPT-4o Mini")
            .with_context_length(128_000)
            .with_max_output_tokens(16_384),
        ModelDefinition::new("gpt-4o", "GPT-4o")
            .with_context_length(128_000)
            .with_max_output_tokens(16_384),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_listed() {
        let models = get_models();
        assert!(models.iter().any(|m| m.id == "gpt-3.5-turbo"));
    }
}
