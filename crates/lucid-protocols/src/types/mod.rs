//! Common types used across Lucid.

mod message;
mod common;

pub use message::*;
pub use common::*;
