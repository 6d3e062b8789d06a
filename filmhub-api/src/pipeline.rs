//! Character aggregation & stats pipeline
//!
//! Resolves a film's character list from the catalog, fetches each character
//! sequentially, applies optional sort/filter transforms, and computes
//! aggregate statistics over the resulting view. Also serves the film-summary
//! list (films with comment counts), memoized in the result cache.
//!
//! Character fetches are sequential and all-or-nothing: one failed fetch
//! aborts the whole operation with no partial results. Stats are always
//! computed over exactly the characters present in the returned view, so
//! filtering happens before aggregation and sorting never changes the
//! aggregate values.

use crate::cache::ResultCache;
use crate::catalog::CatalogApi;
use crate::db;
use filmhub_common::catalog::{Character, Film};
use filmhub_common::units;
use filmhub_common::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use std::time::Duration;

/// Fixed cache key for the film-summaries aggregate
pub const FILM_SUMMARIES_CACHE_KEY: &str = "film-summaries";

/// Fixed TTL for the film-summaries aggregate (1 hour)
pub const FILM_SUMMARIES_TTL: Duration = Duration::from_secs(3600);

/// Character sort key selection
///
/// `None` is an explicit variant: any unrecognized query value maps to it,
/// preserving the original behavior where an unknown sort key applies no
/// reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    None,
    Name,
    Gender,
    Height,
}

impl SortField {
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("name") => SortField::Name,
            Some("gender") => SortField::Gender,
            Some("height") => SortField::Height,
            _ => SortField::None,
        }
    }
}

/// Character sort direction
///
/// Direction must be given explicitly as `true` or `false`; anything else is
/// `Unspecified` and no reordering occurs even when a sort field is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Unspecified,
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("true") => SortDirection::Ascending,
            Some("false") => SortDirection::Descending,
            _ => SortDirection::Unspecified,
        }
    }
}

/// Gender filter selection
///
/// Matching is exact and case-sensitive on "male"/"female"; characters with
/// any other gender text only appear in the unfiltered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderFilter {
    None,
    Male,
    Female,
}

impl GenderFilter {
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("m") => GenderFilter::Male,
            Some("f") => GenderFilter::Female,
            _ => GenderFilter::None,
        }
    }
}

/// Aggregate statistics over one character view
#[derive(Debug, Clone, Serialize)]
pub struct CharacterStats {
    pub total_number: usize,
    /// Sum of parsed heights, rendered as `"<n>cm"`
    pub total_height_cm: String,
    /// Same total rendered as `"<n>ft and <m.mm>inches"`
    pub total_height_ft: String,
}

/// The pipeline's sole output: an ordered character sequence plus the stats
/// computed over exactly that sequence
#[derive(Debug, Clone, Serialize)]
pub struct CharacterView {
    pub characters: Vec<Character>,
    pub metadata: CharacterStats,
}

/// One film with its comment count, for the film list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmSummary {
    pub name: String,
    pub opening_crawl: String,
    pub comment_count: u64,
}

/// Aggregation pipeline with injected collaborators
///
/// Holds thread-safe handles only (catalog client, db pool, cache); cloned
/// freely across concurrent requests, no request-scoped shared state.
#[derive(Clone)]
pub struct Aggregator {
    catalog: Arc<dyn CatalogApi>,
    db: Pool<Sqlite>,
    cache: ResultCache,
}

impl Aggregator {
    pub fn new(catalog: Arc<dyn CatalogApi>, db: Pool<Sqlite>, cache: ResultCache) -> Self {
        Self { catalog, db, cache }
    }

    /// Build the character view for one film.
    ///
    /// An unknown film id yields an empty view (count 0), not an error;
    /// callers needing a distinct not-found signal must check film existence
    /// themselves.
    pub async fn character_view(
        &self,
        film_id: u64,
        sort: SortField,
        direction: SortDirection,
        filter: GenderFilter,
    ) -> Result<CharacterView> {
        let mut films = self.catalog.fetch_films().await?;
        sort_films_newest_first(&mut films);

        let character_refs = films
            .iter()
            .find(|film| film.episode_id == film_id)
            .map(|film| film.characters.clone())
            .unwrap_or_default();

        // Sequential, all-or-nothing: the first failed fetch aborts the
        // whole operation (simplicity over resilience, kept deliberately).
        let mut characters = Vec::with_capacity(character_refs.len());
        for url in &character_refs {
            characters.push(self.catalog.fetch_character(url).await?);
        }

        apply_sort(&mut characters, sort, direction);
        let characters = apply_filter(characters, filter);
        let metadata = compute_stats(&characters);

        tracing::info!(
            film_id,
            count = metadata.total_number,
            "Built character view"
        );

        Ok(CharacterView {
            characters,
            metadata,
        })
    }

    /// Film list with comment counts, newest release first.
    ///
    /// Memoized under [`FILM_SUMMARIES_CACHE_KEY`] for
    /// [`FILM_SUMMARIES_TTL`]; a hit returns the cached sequence verbatim
    /// without touching the catalog or the comment store.
    pub async fn film_summaries(&self) -> Result<Vec<FilmSummary>> {
        if let Some(bytes) = self.cache.get(FILM_SUMMARIES_CACHE_KEY).await {
            let summaries: Vec<FilmSummary> = serde_json::from_slice(&bytes)
                .map_err(|e| Error::StoreFailure(format!("cached film summaries: {}", e)))?;

            tracing::debug!("Film summaries served from cache");
            return Ok(summaries);
        }

        let mut films = self.catalog.fetch_films().await?;
        sort_films_newest_first(&mut films);

        let mut summaries = Vec::with_capacity(films.len());
        for film in &films {
            let comment_count = db::comments::count_comments(&self.db, film.episode_id).await?;
            summaries.push(FilmSummary {
                name: film.title.clone(),
                opening_crawl: film.opening_crawl.clone(),
                comment_count,
            });
        }

        let bytes = serde_json::to_vec(&summaries)
            .map_err(|e| Error::StoreFailure(format!("serializing film summaries: {}", e)))?;
        self.cache
            .set(FILM_SUMMARIES_CACHE_KEY, bytes, FILM_SUMMARIES_TTL)
            .await;

        Ok(summaries)
    }
}

/// Stable sort, newest release date first (lexicographic string compare;
/// films sharing a date keep catalog order)
fn sort_films_newest_first(films: &mut [Film]) {
    films.sort_by(|a, b| b.release_date.cmp(&a.release_date));
}

/// Stable in-place sort of the character sequence.
///
/// No reordering when the field is `None` or the direction is `Unspecified`.
/// Descending uses a reversed comparator rather than sort-then-reverse so
/// tie order stays stable in both directions.
fn apply_sort(characters: &mut [Character], field: SortField, direction: SortDirection) {
    let ascending = match direction {
        SortDirection::Ascending => true,
        SortDirection::Descending => false,
        SortDirection::Unspecified => return,
    };

    match field {
        SortField::None => {}
        SortField::Name => {
            if ascending {
                characters.sort_by(|a, b| a.name.cmp(&b.name));
            } else {
                characters.sort_by(|a, b| b.name.cmp(&a.name));
            }
        }
        SortField::Gender => {
            if ascending {
                characters.sort_by(|a, b| a.gender.cmp(&b.gender));
            } else {
                characters.sort_by(|a, b| b.gender.cmp(&a.gender));
            }
        }
        SortField::Height => {
            if ascending {
                characters.sort_by(|a, b| a.height_cm().cmp(&b.height_cm()));
            } else {
                characters.sort_by(|a, b| b.height_cm().cmp(&a.height_cm()));
            }
        }
    }
}

/// Select characters matching the gender filter, preserving order
fn apply_filter(characters: Vec<Character>, filter: GenderFilter) -> Vec<Character> {
    let wanted = match filter {
        GenderFilter::None => return characters,
        GenderFilter::Male => "male",
        GenderFilter::Female => "female",
    };

    characters
        .into_iter()
        .filter(|c| c.gender == wanted)
        .collect()
}

/// Stats over the post-filter sequence: count plus total height in both
/// renderings (unparseable heights contribute 0 to the sum)
fn compute_stats(characters: &[Character]) -> CharacterStats {
    let total_cm: u64 = characters.iter().map(|c| c.height_cm()).sum();

    CharacterStats {
        total_number: characters.len(),
        total_height_cm: units::format_cm(total_cm),
        total_height_ft: units::to_feet_inches(total_cm).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(name: &str, height: &str, gender: &str) -> Character {
        Character {
            name: name.to_string(),
            height: height.to_string(),
            mass: "77".to_string(),
            hair_color: "brown".to_string(),
            skin_color: "fair".to_string(),
            eye_color: "blue".to_string(),
            birth_year: "19BBY".to_string(),
            gender: gender.to_string(),
        }
    }

    #[test]
    fn test_sort_field_from_query() {
        assert_eq!(SortField::from_query(Some("name")), SortField::Name);
        assert_eq!(SortField::from_query(Some("gender")), SortField::Gender);
        assert_eq!(SortField::from_query(Some("height")), SortField::Height);
        assert_eq!(SortField::from_query(Some("mass")), SortField::None);
        assert_eq!(SortField::from_query(Some("NAME")), SortField::None);
        assert_eq!(SortField::from_query(None), SortField::None);
    }

    #[test]
    fn test_sort_direction_from_query() {
        assert_eq!(SortDirection::from_query(Some("true")), SortDirection::Ascending);
        assert_eq!(SortDirection::from_query(Some("false")), SortDirection::Descending);
        assert_eq!(SortDirection::from_query(Some("1")), SortDirection::Unspecified);
        assert_eq!(SortDirection::from_query(Some("yes")), SortDirection::Unspecified);
        assert_eq!(SortDirection::from_query(None), SortDirection::Unspecified);
    }

    #[test]
    fn test_gender_filter_from_query() {
        assert_eq!(GenderFilter::from_query(Some("m")), GenderFilter::Male);
        assert_eq!(GenderFilter::from_query(Some("f")), GenderFilter::Female);
        assert_eq!(GenderFilter::from_query(Some("male")), GenderFilter::None);
        assert_eq!(GenderFilter::from_query(Some("")), GenderFilter::None);
        assert_eq!(GenderFilter::from_query(None), GenderFilter::None);
    }

    #[test]
    fn test_sort_skipped_without_direction() {
        let mut chars = vec![
            character("Chewbacca", "228", "male"),
            character("Ackbar", "180", "male"),
        ];
        apply_sort(&mut chars, SortField::Name, SortDirection::Unspecified);
        assert_eq!(chars[0].name, "Chewbacca");
    }

    #[test]
    fn test_sort_skipped_without_field() {
        let mut chars = vec![
            character("Chewbacca", "228", "male"),
            character("Ackbar", "180", "male"),
        ];
        apply_sort(&mut chars, SortField::None, SortDirection::Ascending);
        assert_eq!(chars[0].name, "Chewbacca");
    }

    #[test]
    fn test_sort_by_name_both_directions() {
        let mut chars = vec![
            character("Chewbacca", "228", "male"),
            character("Ackbar", "180", "male"),
            character("Leia Organa", "150", "female"),
        ];

        apply_sort(&mut chars, SortField::Name, SortDirection::Ascending);
        let names: Vec<_> = chars.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Ackbar", "Chewbacca", "Leia Organa"]);

        apply_sort(&mut chars, SortField::Name, SortDirection::Descending);
        let names: Vec<_> = chars.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Leia Organa", "Chewbacca", "Ackbar"]);
    }

    #[test]
    fn test_sort_by_height_treats_unparseable_as_zero() {
        let mut chars = vec![
            character("Chewbacca", "228", "male"),
            character("R2-D2", "unknown", "n/a"),
            character("Leia Organa", "150", "female"),
        ];
        apply_sort(&mut chars, SortField::Height, SortDirection::Ascending);
        let names: Vec<_> = chars.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["R2-D2", "Leia Organa", "Chewbacca"]);
    }

    #[test]
    fn test_sort_ties_keep_original_order() {
        let mut chars = vec![
            character("First", "180", "male"),
            character("Second", "180", "male"),
            character("Shorter", "150", "male"),
        ];

        apply_sort(&mut chars, SortField::Height, SortDirection::Descending);
        let names: Vec<_> = chars.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Shorter"]);

        apply_sort(&mut chars, SortField::Height, SortDirection::Ascending);
        let names: Vec<_> = chars.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Shorter", "First", "Second"]);
    }

    #[test]
    fn test_filter_is_exact_and_case_sensitive() {
        let chars = vec![
            character("Luke Skywalker", "172", "male"),
            character("Leia Organa", "150", "female"),
            character("Shouty", "170", "MALE"),
            character("R2-D2", "96", "n/a"),
        ];

        let males = apply_filter(chars.clone(), GenderFilter::Male);
        assert_eq!(males.len(), 1);
        assert_eq!(males[0].name, "Luke Skywalker");

        let females = apply_filter(chars.clone(), GenderFilter::Female);
        assert_eq!(females.len(), 1);
        assert_eq!(females[0].name, "Leia Organa");

        let all = apply_filter(chars, GenderFilter::None);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_stats_over_empty_sequence() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_number, 0);
        assert_eq!(stats.total_height_cm, "0cm");
        assert_eq!(stats.total_height_ft, "0ft and 0.00inches");
    }

    #[test]
    fn test_stats_sum_skips_unparseable() {
        let chars = vec![
            character("Luke Skywalker", "172", "male"),
            character("R2-D2", "unknown", "n/a"),
            character("Leia Organa", "150", "female"),
        ];
        let stats = compute_stats(&chars);
        assert_eq!(stats.total_number, 3);
        assert_eq!(stats.total_height_cm, "322cm");
        assert_eq!(stats.total_height_ft, "10ft and 6.77inches");
    }
}
