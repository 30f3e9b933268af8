//! # Lucid Protocols
//!
//! Core protocol definitions for Lucid.
//! Contains only interface definitions and wire types - no implementations.
//!
//! ## Contents
//!
//! - [`LLMProvider`] - Trait for LLM provider implementations
//! - [`relay`] - Request/response bodies exchanged with the relay server
//! - [`ProviderError`] - Errors surfaced by providers

pub mod error;
pub mod provider;
pub mod relay;
pub mod types;

pub use error::{ProviderError, ProviderFailureKind};
pub use provider::{CompletionRequest, CompletionResponse, LLMProvider, ModelDefinition};
pub use relay::{
    ConfigureRequest, ConfigureResponse, ErrorBody, ExplainRequest, ExplainResponse,
    ExplanationMode, RequestValidationError, MAX_TEXT_CHARS,
};
pub use types::*;
