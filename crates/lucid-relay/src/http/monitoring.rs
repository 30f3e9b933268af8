//! Monitoring and health check handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::RelayState;

/// Health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy.
    Healthy,
    /// Service is up but cannot serve explanations yet.
    Degraded,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub requests_total: u64,
    pub components: Vec<ComponentHealth>,
}

/// Component health status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Detailed health check.
pub async fn health_check(State(state): State<Arc<RelayState>>) -> Json<HealthResponse> {
    let provider = match state.provider() {
        Some(provider) => ComponentHealth {
            name: "provider".to_string(),
            status: HealthStatus::Healthy,
            message: Some(provider.id().to_string()),
        },
        None => ComponentHealth {
            name: "provider".to_string(),
            status: HealthStatus::Degraded,
            message: Some("no API key configured".to_string()),
        },
    };
    let components = vec![
        ComponentHealth {
            name: "api".to_string(),
            status: HealthStatus::Healthy,
            message: None,
        },
        provider,
    ];

    let status = if components.iter().any(|c| c.status == HealthStatus::Degraded) {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime().as_secs(),
        requests_total: state.request_count(),
        components,
    })
}

/// Liveness probe.
pub async fn liveness_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_provider::MockProvider;
    use lucid_config::ProviderProfile;

    #[test]
    fn test_health_status_serialize() {
        assert_eq!(serde_json::to_string(&HealthStatus::Healthy).unwrap(), "\"healthy\"");
        assert_eq!(serde_json::to_string(&HealthStatus::Degraded).unwrap(), "\"degraded\"");
    }

    #[tokio::test]
    async fn test_health_degraded_without_key() {
        let mock = Arc::new(MockProvider::replying("ok"));
        let state = Arc::new(RelayState::new(ProviderProfile::openai(), MockProvider::factory(mock)));
        let Json(health) = health_check(State(state)).await;
        assert_eq!(health.status, HealthStatus::Degraded);
        assert_eq!(health.components.len(), 2);
    }

    #[tokio::test]
    async fn test_health_healthy_with_key() {
        let mock = Arc::new(MockProvider::replying("ok"));
        let state = Arc::new(RelayState::new(ProviderProfile::openai(), MockProvider::factory(mock.clone())));
        state.install(mock);
        let Json(health) = health_check(State(state)).await;
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.components[1].message.as_deref(), Some("mock"));
    }

    #[tokio::test]
    async fn test_liveness_probe() {
        let response = liveness_probe().await;
        assert_eq!(response.0["status"], "alive");
    }
}
