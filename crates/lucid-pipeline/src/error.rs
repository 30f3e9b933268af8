//! Pipeline error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lucid_protocols::ProviderFailureKind;

/// Provider-side failure as reported by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFailure {
    Quota,
    InvalidKey,
    Permission,
    Other(String),
}

impl ProviderFailure {
    /// Classify a relay error body.
    pub fn from_kind(kind: Option<ProviderFailureKind>, message: impl Into<String>) -> Self {
        match kind {
            Some(ProviderFailureKind::Quota) => Self::Quota,
            Some(ProviderFailureKind::InvalidKey) => Self::InvalidKey,
            Some(ProviderFailureKind::Permission) => Self::Permission,
            Some(ProviderFailureKind::Other) | None => Self::Other(message.into()),
        }
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quota => write!(f, "quota exceeded"),
            Self::InvalidKey => write!(f, "invalid API key"),
            Self::Permission => write!(f, "permission denied"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

/// Why an explanation could not be shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplainError {
    #[error("API key is not configured")]
    NeedsConfiguration,

    #[error("Provider error: {0}")]
    Provider(ProviderFailure),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The relay refused the request itself; sending it again cannot help.
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Selection too long: {len} characters (max {max})")]
    InputTooLong { len: usize, max: usize },
}

impl ExplainError {
    /// Text safe to show in the panel.
    pub fn user_message(&self) -> String {
        match self {
            Self::NeedsConfiguration => {
                "Please configure your API key to start getting explanations.".to_string()
            }
            Self::Provider(ProviderFailure::Quota) => {
                "API quota exceeded. Please try again later or check your plan limits."
                    .to_string()
            }
            Self::Provider(ProviderFailure::InvalidKey) => {
                "Invalid API key - please check your key and try again".to_string()
            }
            Self::Provider(ProviderFailure::Permission) => {
                "API key does not have permission to use this model".to_string()
            }
            Self::Provider(ProviderFailure::Other(message)) => message.clone(),
            Self::Network(_) => {
                "Could not connect to the server. Please make sure the server is running."
                    .to_string()
            }
            Self::MalformedResponse(_) => {
                "Received an unexpected response from the server.".to_string()
            }
            Self::Rejected(message) => message.clone(),
            Self::InputTooLong { max, .. } => {
                format!("Selection is too long. Select at most {max} characters.")
            }
        }
    }

    /// Whether retrying the same request can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Provider(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(ExplainError::Network("refused".into()).is_retryable());
        assert!(ExplainError::Provider(ProviderFailure::Quota).is_retryable());
        assert!(!ExplainError::NeedsConfiguration.is_retryable());
        assert!(!ExplainError::MalformedResponse("x".into()).is_retryable());
        assert!(!ExplainError::InputTooLong { len: 1200, max: 1000 }.is_retryable());
        assert!(!ExplainError::Rejected("Text is empty".into()).is_retryable());
    }

    #[test]
    fn test_provider_display_is_readable() {
        let err = ExplainError::Provider(ProviderFailure::Other("model overloaded".into()));
        assert_eq!(err.to_string(), "Provider error: model overloaded");
        assert_eq!(
            ExplainError::Provider(ProviderFailure::Quota).to_string(),
            "Provider error: quota exceeded"
        );
    }

    #[test]
    fn test_network_message_hides_detail() {
        let err = ExplainError::Network("tcp connect error: 127.0.0.1:5000".into());
        assert!(err.user_message().starts_with("Could not connect to the server"));
        assert!(!err.user_message().contains("127.0.0.1"));
    }

    #[test]
    fn test_provider_other_passes_message_through() {
        let err = ExplainError::Provider(ProviderFailure::Other("model overloaded".into()));
        assert_eq!(err.user_message(), "model overloaded");
    }

    #[test]
    fn test_failure_from_kind() {
        assert_eq!(
            ProviderFailure::from_kind(Some(ProviderFailureKind::Quota), "q"),
            ProviderFailure::Quota
        );
        assert_eq!(
            ProviderFailure::from_kind(None, "boom"),
            ProviderFailure::Other("boom".into())
        );
    }
}
