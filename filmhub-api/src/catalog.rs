//! Catalog API client
//!
//! Outbound HTTP client for the external film/character catalog. Two
//! resource kinds are fetched: the full film list (one call, no pagination
//! handling) and individual characters by the opaque resource URLs the
//! films payload supplies. No retry, no caching; the caller decides how to
//! handle failures.

use async_trait::async_trait;
use filmhub_common::catalog::{Character, Film, FilmsPage};
use filmhub_common::{Error, Result};
use std::time::Duration;

/// Default upstream base URL
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://swapi.dev/api";

const USER_AGENT: &str = concat!("filmhub/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Catalog fetch operations
///
/// The pipeline depends on this trait rather than the concrete client so
/// tests can substitute a fake catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Retrieve the full film catalog in one call
    async fn fetch_films(&self) -> Result<Vec<Film>>;

    /// Retrieve one character by its opaque resource URL
    async fn fetch_character(&self, url: &str) -> Result<Character>;
}

/// HTTP-backed catalog client
///
/// TLS certificate verification is reqwest's default (on).
pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build catalog HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// GET a URL and deserialize the JSON body
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url = %url, "Querying catalog");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // A reachable catalog answering with an error status is a
            // malformed result, not a transport failure
            return Err(status_failure(status.as_u16(), url));
        }

        response
            .json()
            .await
            .map_err(|e| Error::UpstreamMalformed(e.to_string()))
    }
}

/// Error for a non-success upstream status
fn status_failure(code: u16, url: &str) -> Error {
    Error::UpstreamMalformed(format!("catalog returned HTTP {} for {}", code, url))
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn fetch_films(&self) -> Result<Vec<Film>> {
        let url = format!("{}/films", self.base_url);
        let page: FilmsPage = self.get_json(&url).await?;

        tracing::info!(count = page.results.len(), "Retrieved film catalog");
        Ok(page.results)
    }

    async fn fetch_character(&self, url: &str) -> Result<Character> {
        let character: Character = self.get_json(url).await?;

        tracing::debug!(name = %character.name, "Retrieved character");
        Ok(character)
    }
}
