//! Shared test fixtures: fake catalog and record builders
#![allow(dead_code)]

use async_trait::async_trait;
use filmhub_api::catalog::CatalogApi;
use filmhub_api::db::init::create_comments_table;
use filmhub_common::catalog::{Character, Film};
use filmhub_common::{Error, Result};
use sqlx::{Pool, Sqlite};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory catalog fake with canned films/characters
///
/// Counts films fetches so tests can observe cache short-circuiting.
pub struct FakeCatalog {
    films: Vec<Film>,
    characters: HashMap<String, Character>,
    fail_films: bool,
    films_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new(films: Vec<Film>, characters: Vec<(&str, Character)>) -> Self {
        Self {
            films,
            characters: characters
                .into_iter()
                .map(|(url, c)| (url.to_string(), c))
                .collect(),
            fail_films: false,
            films_calls: AtomicUsize::new(0),
        }
    }

    /// A catalog whose films fetch always fails
    pub fn unavailable() -> Self {
        Self {
            films: Vec::new(),
            characters: HashMap::new(),
            fail_films: true,
            films_calls: AtomicUsize::new(0),
        }
    }

    pub fn films_fetch_count(&self) -> usize {
        self.films_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn fetch_films(&self) -> Result<Vec<Film>> {
        self.films_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_films {
            return Err(Error::UpstreamUnavailable("catalog offline".to_string()));
        }

        Ok(self.films.clone())
    }

    async fn fetch_character(&self, url: &str) -> Result<Character> {
        self.characters
            .get(url)
            .cloned()
            .ok_or_else(|| Error::UpstreamUnavailable(format!("no route to {}", url)))
    }
}

/// Film builder with boilerplate fields filled in
pub fn film(title: &str, episode_id: u64, release_date: &str, character_urls: &[&str]) -> Film {
    Film {
        title: title.to_string(),
        episode_id,
        opening_crawl: format!("Opening crawl for {}", title),
        director: "George Lucas".to_string(),
        producer: "Gary Kurtz".to_string(),
        release_date: release_date.to_string(),
        characters: character_urls.iter().map(|u| u.to_string()).collect(),
        planets: Vec::new(),
        starships: Vec::new(),
        vehicles: Vec::new(),
        species: Vec::new(),
        created: "2014-12-10T14:23:31.880000Z".to_string(),
        edited: "2014-12-20T19:49:45.256000Z".to_string(),
        url: format!("https://catalog.test/films/{}/", episode_id),
    }
}

/// Character builder with boilerplate fields filled in
pub fn character(name: &str, height: &str, gender: &str) -> Character {
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

/// In-memory database with the comments table bootstrapped
pub async fn memory_pool() -> Pool<Sqlite> {
    let pool = sqlx::SqlitePool::connect(":memory:").await.unwrap();
    create_comments_table(&pool).await.unwrap();
    pool
}
