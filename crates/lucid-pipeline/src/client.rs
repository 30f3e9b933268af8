//! Relay HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lucid_protocols::{
    ConfigureRequest, ConfigureResponse, ErrorBody, ExplainRequest, ExplainResponse,
};

use crate::error::{ExplainError, ProviderFailure};

/// A successful explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvements: Option<String>,
}

impl Explanation {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            improvements: None,
        }
    }

    pub fn with_improvements(mut self, improvements: impl Into<String>) -> Self {
        self.improvements = Some(improvements.into());
        self
    }
}

/// Sends explain requests somewhere that can answer them.
#[async_trait]
pub trait ExplainClient: Send + Sync {
    async fn explain(&self, request: &ExplainRequest) -> Result<Explanation, ExplainError>;
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// [`ExplainClient`] talking to the relay over HTTP.
pub struct RelayClient {
    base_url: String,
    client: reqwest::Client,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Every call, `configure` included, fails with a network error once
    /// `timeout` has passed.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .connect_timeout(CONNECT_TIMEOUT.min(timeout))
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit an API key to the relay. The relay validates it before
    /// installing it.
    pub async fn configure(&self, api_key: &str) -> Result<(), ExplainError> {
        let body = ConfigureRequest {
            api_key: api_key.to_string(),
        };
        let response = self
            .client
            .post(format!("{}/api/config", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ExplainError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let reply: ConfigureResponse = response
            .json()
            .await
            .map_err(|e| ExplainError::MalformedResponse(e.to_string()))?;
        if reply.success {
            Ok(())
        } else {
            Err(ExplainError::Provider(ProviderFailure::InvalidKey))
        }
    }
}

#[async_trait]
impl ExplainClient for RelayClient {
    async fn explain(&self, request: &ExplainRequest) -> Result<Explanation, ExplainError> {
        let response = self
            .client
            .post(format!("{}/api/explain", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ExplainError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: ExplainResponse = response
            .json()
            .await
            .map_err(|e| ExplainError::MalformedResponse(e.to_string()))?;

        let text = body.explanation.trim();
        if text.is_empty() {
            return Err(ExplainError::MalformedResponse(
                "empty explanation".to_string(),
            ));
        }

        Ok(Explanation {
            text: text.to_string(),
            improvements: body
                .improvements
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}

async fn error_from_response(response: reqwest::Response) -> ExplainError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    debug!(status, "Relay request failed");

    // A 400 without a provider kind means the relay refused the request body.
    let rejected = status == 400;
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) if body.needs_configuration => ExplainError::NeedsConfiguration,
        Ok(body) if rejected && body.kind.is_none() => ExplainError::Rejected(body.error),
        Ok(body) => ExplainError::Provider(ProviderFailure::from_kind(body.kind, body.error)),
        Err(_) if rejected => ExplainError::Rejected(format!("HTTP {status}")),
        Err(_) => ExplainError::Provider(ProviderFailure::Other(format!("HTTP {status}"))),
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
