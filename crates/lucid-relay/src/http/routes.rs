//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::http::handlers::{configure, explain};
use crate::http::monitoring;
use crate::state::RelayState;

/// Create the relay router.
///
/// ```text
/// /api
///   POST /api/explain - Explain a selection
///   POST /api/config  - Validate and install an API key
///
/// /health - Detailed health check
/// /livez  - Liveness probe
/// ```
///
/// An empty `cors_origins` list allows any origin; extension origins
/// (`chrome-extension://...`) are not known ahead of time.
pub fn create_router(state: Arc<RelayState>, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/explain", post(explain))
        .route("/config", post(configure))
        .with_state(state.clone());

    let monitoring_routes = Router::new()
        .route("/health", get(monitoring::health_check))
        .with_state(state);

    let liveness_route = Router::new().route("/livez", get(monitoring::liveness_probe));

    Router::new()
        .nest("/api", api_routes)
        .merge(monitoring_routes)
        .merge(liveness_route)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(parsed))
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
