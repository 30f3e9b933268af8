//! LLM Provider trait definition.

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, ModelDefinition};
use crate::error::ProviderError;

/// Core trait for LLM providers.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Returns the available models.
    fn models(&self) -> &[ModelDefinition];

    /// Generate a completion.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;

    /// Check that the credential works by asking for a single token.
    async fn validate(&self, model: &str) -> Result<(), ProviderError> {
        let request = CompletionRequest::single_turn(model, "Test")
            .with_max_tokens(1);
        self.complete(request).await.map(|_| ())
    }
}
