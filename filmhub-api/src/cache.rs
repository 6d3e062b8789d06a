//! Result cache
//!
//! In-process key-value byte cache with per-entry time-to-live. Used to
//! memoize the film-summaries aggregate under one fixed key; a hit
//! short-circuits the films fetch and comment-count loop entirely.
//!
//! The handle is cheap to clone and safe to share across concurrent
//! requests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct CacheEntry {
    expires_at: Instant,
    bytes: Vec<u8>,
}

/// Shared TTL byte cache
#[derive(Clone)]
pub struct ResultCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get a value by key; expired entries miss and are dropped
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut entries = self.entries.write().await;

        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.bytes.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value under `key` for `ttl`
    pub async fn set(&self, key: &str, bytes: Vec<u8>, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                expires_at: Instant::now() + ttl,
                bytes,
            },
        );
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}
