//! Shared API request/response types
//!
//! Every successful response is wrapped in the same envelope: a status
//! marker, a human-readable message, and the payload. Failures use the
//! error body with the error's descriptive message.

use serde::{Deserialize, Serialize};

/// Success envelope for all API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }
}

/// Error body returned for failed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
