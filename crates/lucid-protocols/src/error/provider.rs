//! LLM Provider errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not configured: no API key has been set")]
    NotConfigured,

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited: retry after {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}

/// Coarse classification of a provider failure, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFailureKind {
    Quota,
    InvalidKey,
    Permission,
    Other,
}

impl ProviderError {
    /// Build an error from a non-success HTTP status and the provider's message.
    ///
    /// Message text wins over the status code: Gemini reports an invalid key
    /// as a 400 and quota exhaustion as a 429 with "quota" in the message.
    pub fn from_api_response(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();

        if lower.contains("quota") {
            return Self::QuotaExceeded(message);
        }
        if lower.contains("api key not valid")
            || lower.contains("invalid api key")
            || lower.contains("incorrect api key")
        {
            return Self::AuthenticationFailed(message);
        }
        if lower.contains("permission") {
            return Self::PermissionDenied(message);
        }

        match status {
            401 => Self::AuthenticationFailed(message),
            403 => Self::PermissionDenied(message),
            429 => Self::RateLimited {
                retry_after_seconds: 0,
            },
            400 => Self::InvalidRequest(message),
            _ => Self::ApiError { status, message },
        }
    }

    /// Classify this error for display.
    pub fn kind(&self) -> ProviderFailureKind {
        match self {
            Self::QuotaExceeded(_) | Self::RateLimited { .. } => ProviderFailureKind::Quota,
            Self::AuthenticationFailed(_) => ProviderFailureKind::InvalidKey,
            Self::PermissionDenied(_) => ProviderFailureKind::Permission,
            _ => ProviderFailureKind::Other,
        }
    }

    /// Whether the failure happened before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
