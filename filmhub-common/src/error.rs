//! Common error types for filmhub
//!
//! Defines service-wide error types using thiserror for clear error propagation.

use thiserror::Error;

/// Common result type for filmhub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the filmhub service
///
/// None of these are retried internally; any failure aborts the current
/// request's operation and surfaces to the caller as a terminal failure.
#[derive(Error, Debug)]
pub enum Error {
    /// Network/transport failure reaching the upstream catalog
    #[error("Upstream catalog unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream response body does not parse into the expected shape
    #[error("Upstream catalog response malformed: {0}")]
    UpstreamMalformed(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Comment store or result cache operation error
    #[error("Store failure: {0}")]
    StoreFailure(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Error::StoreFailure(e.to_string())
    }
}
