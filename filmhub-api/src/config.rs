//! filmhub-api specific configuration

use std::path::PathBuf;

/// Aggregator service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_path: PathBuf,
    pub catalog_base_url: String,
}
