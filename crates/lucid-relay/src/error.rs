//! Relay error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use lucid_protocols::{ErrorBody, ProviderError, RequestValidationError};

/// Relay error types. Every variant renders as an [`ErrorBody`].
#[derive(Debug, Error)]
pub enum RelayError {
    /// No credential installed yet.
    #[error("API not configured. Please set up your API key first.")]
    NotConfigured,

    /// `/api/config` called without a key.
    #[error("API key is required")]
    MissingApiKey,

    /// The key was rejected by the provider during validation.
    #[error("{0}")]
    InvalidApiKey(String),

    /// Malformed JSON body.
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// Well-formed body that breaks the request rules.
    #[error(transparent)]
    Validation(#[from] RequestValidationError),

    /// Upstream provider failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured
            | Self::MissingApiKey
            | Self::InvalidApiKey(_)
            | Self::BadRequest(_)
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Provider(err) => match err {
                ProviderError::NotConfigured => StatusCode::BAD_REQUEST,
                ProviderError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
                ProviderError::PermissionDenied(_) => StatusCode::FORBIDDEN,
                ProviderError::QuotaExceeded(_) | ProviderError::RateLimited { .. } => {
                    StatusCode::TOO_MANY_REQUESTS
                }
                ProviderError::Network(_) => StatusCode::BAD_GATEWAY,
                ProviderError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            Self::NotConfigured | Self::Provider(ProviderError::NotConfigured) => {
                ErrorBody::needs_configuration(self.to_string())
            }
            Self::Provider(err) => ErrorBody::new(self.to_string()).with_kind(err.kind()),
            _ => ErrorBody::new(self.to_string()),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
