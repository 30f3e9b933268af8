//! OpenAI provider implementation.

use async_trait::async_trait;
use tracing::debug;

use lucid_protocols::error::ProviderError;
use lucid_protocols::provider::{CompletionRequest, CompletionResponse, LLMProvider, ModelDefinition};
use lucid_protocols::types::{Message, StopReason, Usage};

use crate::api::{error_message, ApiRequest, ApiResponse};
use crate::converter::convert_messages;
use crate::models::get_models;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI LLM provider.
pub struct OpenAIProvider {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
    models: Vec<ModelDefinition>,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, DEFAULT_API_URL.to_string())
    }

    /// Create provider with a full chat completions endpoint URL.
    pub fn with_url(api_key: String, api_url: String) -> Self {
        Self {
            api_key,
            api_url,
            client: reqwest::Client::new(),
            models: get_models(),
        }
    }

    /// Create provider for an OpenAI-compatible API rooted at `base_url`
    /// (e.g. `https://api.openai.com/v1`).
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        let api_url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        Self::with_url(api_key, api_url)
    }

    fn build_request(&self, request: &CompletionRequest) -> ApiRequest {
        ApiRequest {
            model: request.model.clone(),
            messages: convert_messages(request),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
        }
    }

    async fn send_request(&self, api_request: &ApiRequest) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let text = response.text().await.unwrap_or_default();
            debug!(status, "OpenAI request failed");
            return Err(match ProviderError::from_api_response(status, error_message(&text)) {
                ProviderError::RateLimited { .. } => ProviderError::RateLimited {
                    retry_after_seconds: retry_after.unwrap_or(0),
                },
                other => other,
            });
        }

        Ok(response)
    }
}

fn parse_response(api_response: ApiResponse) -> Result<CompletionResponse, ProviderError> {
    let choice = api_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".to_string()))?;

    let usage = api_response
        .usage
        .map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
        .unwrap_or_default();

    Ok(CompletionResponse {
        id: api_response.id,
        model: api_response.model,
        message: Message::assistant(choice.message.content.unwrap_or_default()),
        stop_reason: StopReason::from_finish_reason(choice.finish_reason.as_deref()),
        usage,
    })
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn id(&self) -> &str {
        "openai"
    }

    fn models(&self) -> &[ModelDefinition] {
        &self.models
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let api_request = self.build_request(&request);
        let response = self.send_request(&api_request).await?;
        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        parse_response(api_response)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
