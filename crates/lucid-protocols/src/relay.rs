//! Wire types exchanged between the selection pipeline and the relay.
//!
//! Field names follow the JSON the relay has always spoken (`apiKey`,
//! `needsConfiguration`), so existing clients keep working.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ProviderFailureKind;

/// Longest selection, in characters, that may be sent for explanation.
pub const MAX_TEXT_CHARS: usize = 1000;

/// How verbose a plain-text explanation should be.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationMode {
    /// About 50 words, plain language.
    #[default]
    #[serde(alias = "brief")]
    Simple,
    /// Up to about 100 words.
    Detailed,
    /// User-supplied instruction placed before the text.
    Custom(String),
}

impl ExplanationMode {
    pub fn label(&self) -> &str {
        match self {
            Self::Simple => "simple",
            Self::Detailed => "detailed",
            Self::Custom(_) => "custom",
        }
    }
}

/// POST /api/explain body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    /// Code analysis: explanation plus suggested improvements.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub analyze: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ExplanationMode>,
}

/// Why an explain request was rejected before reaching a provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestValidationError {
    #[error("Text is empty")]
    EmptyText,

    #[error("Text is {len} characters long; at most {max} are allowed")]
    TextTooLong { len: usize, max: usize },
}

impl ExplainRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            question: None,
            analyze: false,
            mode: None,
        }
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    pub fn with_analyze(mut self, analyze: bool) -> Self {
        self.analyze = analyze;
        self
    }

    pub fn with_mode(mut self, mode: ExplanationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Enforce the 1..=1000 character bound on the trimmed `text`.
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        let len = self.text.trim().chars().count();
        if len == 0 {
            return Err(RequestValidationError::EmptyText);
        }
        if len > MAX_TEXT_CHARS {
            return Err(RequestValidationError::TextTooLong {
                len,
                max: MAX_TEXT_CHARS,
            });
        }
        Ok(())
    }
}

/// Successful POST /api/explain response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvements: Option<String>,
}

/// Error body returned by every relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub needs_configuration: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProviderFailureKind>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            needs_configuration: false,
            kind: None,
        }
    }

    pub fn needs_configuration(error: impl Into<String>) -> Self {
        Self {
            needs_configuration: true,
            ..Self::new(error)
        }
    }

    pub fn with_kind(mut self, kind: ProviderFailureKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// POST /api/config body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureRequest {
    #[serde(default)]
    pub api_key: String,
}

/// Successful POST /api/config response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureResponse {
    pub success: bool,
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
