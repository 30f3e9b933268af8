//! Relay API handlers.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{debug, info, warn};

use lucid_protocols::{
    CompletionResponse, ConfigureRequest, ConfigureResponse, ExplainRequest, ExplainResponse,
    LLMProvider, ProviderError,
};

use crate::error::RelayError;
use crate::prompts::{Prompt, EMPTY_EXPLANATION, EMPTY_IMPROVEMENTS};
use crate::state::RelayState;

/// POST /api/explain
///
/// The credential check runs before the body is inspected, so an
/// unconfigured relay always answers with `needsConfiguration`.
pub async fn explain(
    State(state): State<Arc<RelayState>>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, RelayError> {
    state.increment_requests();

    let provider = state.provider().ok_or(RelayError::NotConfigured)?;
    let Json(request) = payload.map_err(|e| RelayError::BadRequest(e.body_text()))?;
    request.validate()?;

    let profile = state.profile();
    let text = request.text.as_str();

    if request.analyze {
        debug!(chars = text.chars().count(), "Analyzing code selection");
        let explanation_call = provider.complete(Prompt::analysis(text).into_request(profile));
        let improvements_call = provider.complete(Prompt::improvements(text).into_request(profile));
        let (explanation, improvements) =
            futures::try_join!(explanation_call, improvements_call).inspect_err(log_failure)?;
        return Ok(Json(ExplainResponse {
            explanation: reply_text(&explanation, EMPTY_EXPLANATION),
            improvements: Some(reply_text(&improvements, EMPTY_IMPROVEMENTS)),
        }));
    }

    let prompt = match request.question.as_deref().filter(|q| !q.trim().is_empty()) {
        Some(question) => Prompt::question(text, question),
        None => Prompt::concise(text, &request.mode.clone().unwrap_or_default()),
    };
    debug!(kind = ?prompt.kind, "Explaining selection");

    let response = provider
        .complete(prompt.into_request(profile))
        .await
        .inspect_err(log_failure)?;

    Ok(Json(ExplainResponse {
        explanation: reply_text(&response, EMPTY_EXPLANATION),
        improvements: None,
    }))
}

/// POST /api/config
///
/// Validates the key with a one-token completion before installing it.
pub async fn configure(
    State(state): State<Arc<RelayState>>,
    payload: Result<Json<ConfigureRequest>, JsonRejection>,
) -> Result<Json<ConfigureResponse>, RelayError> {
    let Json(request) = payload.map_err(|e| RelayError::BadRequest(e.body_text()))?;
    let api_key = request.api_key.trim();
    if api_key.is_empty() {
        return Err(RelayError::MissingApiKey);
    }

    let candidate: Arc<dyn LLMProvider> = state.build_provider(api_key.to_string());
    match candidate.validate(&state.profile().model).await {
        Ok(()) => {
            state.install(candidate);
            info!("API key validated and installed");
            Ok(Json(ConfigureResponse { success: true }))
        }
        Err(e) => {
            warn!(error = %e, "API key validation failed");
            Err(RelayError::InvalidApiKey(rejection_message(&e)))
        }
    }
}

fn reply_text(response: &CompletionResponse, fallback: &str) -> String {
    response.text().unwrap_or(fallback).to_string()
}

fn rejection_message(err: &ProviderError) -> String {
    match err {
        ProviderError::AuthenticationFailed(message)
        | ProviderError::PermissionDenied(message)
        | ProviderError::QuotaExceeded(message)
        | ProviderError::InvalidRequest(message)
        | ProviderError::ApiError { message, .. }
            if !message.trim().is_empty() =>
        {
            message.clone()
        }
        _ => "Invalid API key - please check your key and try again".to_string(),
    }
}

fn log_failure(err: &ProviderError) {
    warn!(error = %err, kind = ?err.kind(), "Provider request failed");
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
