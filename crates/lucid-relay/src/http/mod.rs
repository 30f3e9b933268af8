//! HTTP interface module.
//!
//! Provides REST API endpoints for:
//! - Explanation requests
//! - Credential configuration
//! - Health checks

pub mod handlers;
pub mod routes;

pub(crate) mod monitoring;
