//! Gemini LLM provider implementation.

use async_trait::async_trait;
use tracing::debug;

use lucid_protocols::error::ProviderError;
use lucid_protocols::provider::{CompletionRequest, CompletionResponse, LLMProvider, ModelDefinition};
use lucid_protocols::types::{Message, MessageRole, StopReason, Usage};

use crate::client::GeminiClient;
use crate::types::*;

/// Gemini LLM provider.
pub struct GeminiProvider {
    client: GeminiClient,
    models: Vec<ModelDefinition>,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(api_key: String) -> Self {
        Self::from_client(GeminiClient::new(api_key))
    }

    /// Create a provider against a different API root.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::from_client(GeminiClient::with_base_url(api_key, base_url))
    }

    fn from_client(client: GeminiClient) -> Self {
        Self {
            client,
            models: vec![
                ModelDefinition::new("gemini-1.5-flash", "Gemini 1.5 Flash")
                    .with_context_length(1_000_000)
                    .with_max_output_tokens(8192),
                ModelDefinition::new("gemini-2.0-flash", "Gemini 2.0 Flash")
                    .with_context_length(1_000_000)
                    .with_max_output_tokens(8192),
            ],
        }
    }

    fn convert_messages(&self, messages: &[Message]) -> Vec<Content> {
        messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|msg| {
                let role = match msg.role {
                    MessageRole::Assistant => "model",
                    _ => "user",
                };
                Content::text(role, msg.content.clone())
            })
            .collect()
    }

    /// Explicit system prompt first, then any inline system messages.
    fn convert_system(&self, request: &CompletionRequest) -> Option<Content> {
        let inline = request
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str());
        let text: Vec<&str> = request.system.as_deref().into_iter().chain(inline).collect();
        if text.is_empty() {
            None
        } else {
            Some(Content::text("", text.join("\n\n")))
        }
    }

    fn build_request(&self, request: &CompletionRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: self.convert_messages(&request.messages),
            system_instruction: self.convert_system(request),
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
                top_p: request.top_p,
                max_output_tokens: request.max_tokens,
            }),
        }
    }

    fn convert_response(
        &self,
        response: GenerateContentResponse,
        model: &str,
    ) -> Result<CompletionResponse, ProviderError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(ProviderError::InvalidResponse(format!(
                "Gemini returned no candidates: {}",
                reason
            )));
        };

        let usage = response
            .usage_metadata
            .map(|u| Usage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: format!("gemini-{}", uuid::Uuid::new_v4()),
            model: model.to_string(),
            message: Message::assistant(candidate.content.joined_text()),
            stop_reason: StopReason::from_finish_reason(candidate.finish_reason.as_deref()),
            usage,
        })
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    fn id(&self) -> &str {
        "gemini"
    }

    fn models(&self) -> &[ModelDefinition] {
        &self.models
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        debug!("Gemini complete: model={}", request.model);

        let gemini_request = self.build_request(&request);
        let response = self.client.generate_content(&request.model, &gemini_request).await?;
        self.convert_response(response, &request.model)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
