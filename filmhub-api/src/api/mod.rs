//! HTTP API layer
//!
//! Router construction, shared application context, and request handlers.

pub mod handlers;
pub mod server;
