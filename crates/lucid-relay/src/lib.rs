//! # Lucid Relay
//!
//! Thin HTTP backend that holds the LLM credential and forwards
//! explanation requests to the configured provider.
//!
//! ## Routes
//!
//! - `POST /api/explain` - explain a selection (plain, question, or code analysis)
//! - `POST /api/config` - validate and install an API key
//! - `GET /health`, `GET /livez` - monitoring

pub mod error;
pub mod http;
pub mod prompts;
pub mod server;
pub mod state;

#[cfg(test)]
pub(crate) mod mock_provider;

pub use error::RelayError;
pub use http::routes::create_router;
pub use server::{RelayServer, RelayServerConfig};
pub use state::{ProviderFactory, RelayState};
