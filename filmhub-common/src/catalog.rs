//! Typed records for the external film catalog
//!
//! Shapes mirror the upstream JSON. Extra upstream fields are ignored by
//! serde's default behavior; a missing required field fails deserialization
//! and surfaces as a malformed-upstream error at the client.

use serde::{Deserialize, Serialize};

/// One film record from the catalog
///
/// Immutable once fetched and never persisted locally. Identity within the
/// catalog's fixed film set is the episode number.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Film {
    pub title: String,
    pub episode_id: u64,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    /// ISO-like date string; lexicographic comparison equals chronological
    pub release_date: String,
    /// Opaque per-character resource URLs, fetched individually
    pub characters: Vec<String>,
    pub planets: Vec<String>,
    pub starships: Vec<String>,
    pub vehicles: Vec<String>,
    pub species: Vec<String>,
    pub created: String,
    pub edited: String,
    pub url: String,
}

/// One character record from the catalog
///
/// Fetched fresh per request; never cached or persisted. All fields are
/// free-text strings as delivered by the upstream.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Character {
    pub name: String,
    /// Height in centimeters as a decimal string; may be a non-numeric
    /// placeholder like "unknown"
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    /// Free text; only exactly "male" and "female" are recognized by filters
    pub gender: String,
}

impl Character {
    /// Parsed height for summation and numeric sorting.
    ///
    /// A non-numeric height contributes 0; the raw string is preserved in
    /// the record itself.
    pub fn height_cm(&self) -> u64 {
        self.height.parse().unwrap_or(0)
    }
}

/// The catalog's films-list response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct FilmsPage {
    pub count: u64,
    pub results: Vec<Film>,
}
