//! HTTP router setup
//!
//! Builds the Axum router over the shared application context. Binding and
//! serving happen in `main`.

use crate::cache::ResultCache;
use crate::catalog::CatalogApi;
use crate::pipeline::Aggregator;
use axum::{
    routing::get,
    Router,
};
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application context passed to all handlers
///
/// Holds only thread-safe handles (pool, catalog client, cache); Clone gives
/// us `FromRef<AppContext>` for free via Axum's blanket implementation.
#[derive(Clone)]
pub struct AppContext {
    pub db: Pool<Sqlite>,
    pub catalog: Arc<dyn CatalogApi>,
    pub cache: ResultCache,
}

impl AppContext {
    pub fn new(db: Pool<Sqlite>, catalog: Arc<dyn CatalogApi>, cache: ResultCache) -> Self {
        Self { db, catalog, cache }
    }

    /// Aggregation pipeline over this context's handles
    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.catalog.clone(), self.db.clone(), self.cache.clone())
    }
}

/// Build the application router with all routes
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        // Liveness
        .route("/ping", get(super::handlers::ping))
        .route("/health", get(super::handlers::health))
        // Film list with comment counts (cache-backed)
        .route("/films", get(super::handlers::get_films))
        // Comment CRUD
        .route(
            "/films/:id/comments",
            get(super::handlers::get_comments).post(super::handlers::add_comment),
        )
        // Character aggregation pipeline
        .route("/films/:id/characters", get(super::handlers::get_characters))
        // Attach application context
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
