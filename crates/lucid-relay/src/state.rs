//! Relay state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::info;

use lucid_config::{ProviderKind, ProviderProfile, RelayConfig};
use lucid_protocols::LLMProvider;
use lucid_provider_gemini::GeminiProvider;
use lucid_provider_openai::OpenAIProvider;

/// Builds a provider for a candidate API key.
pub type ProviderFactory = Arc<dyn Fn(String) -> Arc<dyn LLMProvider> + Send + Sync>;

/// State shared across relay handlers.
///
/// Holds the single credential slot. `/api/config` replaces it only after
/// the new key has been validated.
pub struct RelayState {
    provider: RwLock<Option<Arc<dyn LLMProvider>>>,
    factory: ProviderFactory,
    profile: ProviderProfile,
    start_time: Instant,
    request_count: AtomicU64,
}

impl RelayState {
    pub fn new(profile: ProviderProfile, factory: ProviderFactory) -> Self {
        Self {
            provider: RwLock::new(None),
            factory,
            profile,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    /// Build state from configuration, installing the configured key if any.
    pub fn from_config(config: &RelayConfig) -> Self {
        let state = Self::new(config.profile(), provider_factory(config));
        if let Some(key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            let provider = state.build_provider(key.trim().to_string());
            info!(provider = provider.id(), "API key loaded from configuration");
            state.install(provider);
        }
        state
    }

    /// Active sampling profile.
    pub fn profile(&self) -> &ProviderProfile {
        &self.profile
    }

    /// Current provider, if a credential is installed.
    pub fn provider(&self) -> Option<Arc<dyn LLMProvider>> {
        self.provider.read().clone()
    }

    pub fn is_configured(&self) -> bool {
        self.provider.read().is_some()
    }

    /// Build an uninstalled provider for a candidate key.
    pub fn build_provider(&self, api_key: String) -> Arc<dyn LLMProvider> {
        (self.factory)(api_key)
    }

    /// Replace the active provider.
    pub fn install(&self, provider: Arc<dyn LLMProvider>) {
        *self.provider.write() = Some(provider);
    }

    /// Get uptime.
    pub fn uptime(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Get request count.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Increment request count.
    pub fn increment_requests(&self) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Factory for the provider selected in configuration.
pub fn provider_factory(config: &RelayConfig) -> ProviderFactory {
    let kind = config.provider;
    let base_url = config.base_url.clone();
    Arc::new(move |api_key: String| -> Arc<dyn LLMProvider> {
        match (kind, base_url.as_deref()) {
            (ProviderKind::OpenAI, None) => Arc::new(OpenAIProvider::new(api_key)),
            (ProviderKind::OpenAI, Some(url)) => Arc::new(OpenAIProvider::with_base_url(api_key, url)),
            (ProviderKind::Gemini, None) => Arc::new(GeminiProvider::new(api_key)),
            (ProviderKind::Gemini, Some(url)) => {
                Arc::new(GeminiProvider::with_base_url(api_key, url.to_string()))
            }
        }
    })
}
