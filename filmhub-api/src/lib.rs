//! filmhub-api library interface for testing
//!
//! Exposes public APIs for integration testing.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod db;
pub mod pipeline;

pub use api::server::{build_router, AppContext};
