//! Relay server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use lucid_config::Config;

use crate::http::routes::create_router;
use crate::state::RelayState;

/// Relay server configuration.
#[derive(Debug, Clone)]
pub struct RelayServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl RelayServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            cors_origins: Vec::new(),
        }
    }
}

impl Default for RelayServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 5000)
    }
}

/// The relay server.
pub struct RelayServer {
    config: RelayServerConfig,
    state: Arc<RelayState>,
}

impl RelayServer {
    pub fn new(config: RelayServerConfig, state: Arc<RelayState>) -> Self {
        Self { config, state }
    }

    /// Build server and state from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let server_config = RelayServerConfig {
            host: config.server.host.clone(),
            port: config.server.port,
            cors_origins: config.relay.cors_origins.clone(),
        };
        Self::new(server_config, Arc::new(RelayState::from_config(&config.relay)))
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    pub fn state(&self) -> &Arc<RelayState> {
        &self.state
    }

    /// Start the server and serve until Ctrl+C.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = create_router(self.state.clone(), &self.config.cors_origins);

        let addr: SocketAddr = self.addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!(
            "Relay listening on {} (provider configured: {})",
            addr,
            self.state.is_configured()
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Relay stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C, shutting down");
    }
}
