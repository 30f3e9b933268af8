//! # Lucid Provider - Gemini
//!
//! Google Gemini provider for Lucid.

mod client;
mod provider;
mod types;

pub use provider::GeminiProvider;
pub use types::*;
