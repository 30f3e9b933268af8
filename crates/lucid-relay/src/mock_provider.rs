//! Scripted provider for handler and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use lucid_protocols::{
    CompletionRequest, CompletionResponse, LLMProvider, Message, ModelDefinition, ProviderError,
    StopReason, Usage,
};

type Reply = Box<dyn Fn(&CompletionRequest) -> Result<String, ProviderError> + Send + Sync>;

pub struct MockProvider {
    reply: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
    models: Vec<ModelDefinition>,
}

impl MockProvider {
    pub fn new(
        reply: impl Fn(&CompletionRequest) -> Result<String, ProviderError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Box::new(reply),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            models: vec![ModelDefinition::new("mock-model", "Mock")],
        }
    }

    pub fn replying(text: &'static str) -> Self {
        Self::new(move |_| Ok(text.to_string()))
    }

    pub fn failing(make: fn() -> ProviderError) -> Self {
        Self::new(move |_| Err(make()))
    }

    /// Factory that hands out the same provider for every key.
    pub fn factory(provider: Arc<MockProvider>) -> crate::state::ProviderFactory {
        Arc::new(move |_key| provider.clone() as Arc<dyn LLMProvider>)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl LLMProvider for MockProvider {
    fn id(&self) -> &str {
        "mock"
    }

    fn models(&self) -> &[ModelDefinition] {
        &self.models
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());
        let text = (self.reply)(&request)?;
        Ok(CompletionResponse {
            id: format!("mock-{}", self.calls()),
            model: request.model,
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }
}
