//! OpenAI LLM provider for Lucid.

mod api;
mod converter;
mod models;
mod provider;

pub use provider::OpenAIProvider;
