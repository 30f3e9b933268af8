//! Relay server and provider profile configuration.
//!
//! The OpenAI and Gemini profiles keep the sampling parameters each
//! integration has always used. They are deliberately not unified.

use serde::{Deserialize, Serialize};

/// Which LLM backend the relay forwards to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAI,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Gemini => "gemini",
        }
    }
}

/// Relay configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    /// Credential installed at startup. Can also be set later via `/api/config`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Override for the provider endpoint (OpenAI-compatible servers, tests).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default)]
    pub openai: ProfileOverrides,

    #[serde(default)]
    pub gemini: ProfileOverrides,
}

impl RelayConfig {
    /// The effective profile for the selected provider.
    pub fn profile(&self) -> ProviderProfile {
        match self.provider {
            ProviderKind::OpenAI => ProviderProfile::openai().merged(&self.openai),
            ProviderKind::Gemini => ProviderProfile::gemini().merged(&self.gemini),
        }
    }
}

/// Model and sampling parameters used for each kind of prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub model: String,
    pub temperature: f32,
    pub top_p: Option<f32>,
    /// Plain-text explanation.
    pub concise_max_tokens: u32,
    /// Free-form question about the selection.
    pub question_max_tokens: u32,
    /// "What does this code do" half of a code analysis.
    pub analysis_max_tokens: u32,
    /// Improvement suggestions half of a code analysis.
    pub improvements_max_tokens: u32,
}

impl ProviderProfile {
    pub fn openai() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.3,
            top_p: None,
            concise_max_tokens: 100,
            question_max_tokens: 500,
            analysis_max_tokens: 150,
            improvements_max_tokens: 250,
        }
    }

    pub fn gemini() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.3,
            top_p: Some(1.0),
            concise_max_tokens: 75,
            question_max_tokens: 75,
            analysis_max_tokens: 75,
            improvements_max_tokens: 75,
        }
    }

    /// Apply the fields set in `overrides`.
    pub fn merged(mut self, overrides: &ProfileOverrides) -> Self {
        if let Some(model) = &overrides.model {
            self.model = model.clone();
        }
        if let Some(temperature) = overrides.temperature {
            self.temperature = temperature;
        }
        if overrides.top_p.is_some() {
            self.top_p = overrides.top_p;
        }
        if let Some(n) = overrides.concise_max_tokens {
            self.concise_max_tokens = n;
        }
        if let Some(n) = overrides.question_max_tokens {
            self.question_max_tokens = n;
        }
        if let Some(n) = overrides.analysis_max_tokens {
            self.analysis_max_tokens = n;
        }
        if let Some(n) = overrides.improvements_max_tokens {
            self.improvements_max_tokens = n;
        }
        self
    }
}

/// Per-provider overrides from `[relay.openai]` / `[relay.gemini]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileOverrides {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub concise_max_tokens: Option<u32>,
    #[serde(default)]
    pub question_max_tokens: Option<u32>,
    #[serde(default)]
    pub analysis_max_tokens: Option<u32>,
    #[serde(default)]
    pub improvements_max_tokens: Option<u32>,
}
