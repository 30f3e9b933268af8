//! Error types for the Lucid protocol layer.

mod provider;

pub use provider::*;
