//! # Filmhub Common Library
//!
//! Shared code for the filmhub service:
//! - Error taxonomy and result alias
//! - Catalog record types (films, characters)
//! - API response envelope types
//! - Height unit conversion

pub mod api;
pub mod catalog;
pub mod error;
pub mod units;

pub use error::{Error, Result};
