//! HTTP request handlers
//!
//! Implements the REST endpoints: film summaries, comment CRUD, and the
//! character view. Successful responses use the shared success envelope;
//! failures map the error taxonomy onto HTTP status codes with an error
//! body carrying the error's descriptive message.

use crate::api::server::AppContext;
use crate::db;
use crate::pipeline::{FilmSummary, GenderFilter, SortDirection, SortField};
use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use filmhub_common::api::{Envelope, ErrorBody};
use filmhub_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tracing::{error, info};

/// Maximum accepted comment length, enforced before the store is touched
const MAX_COMMENT_CHARS: usize = 500;

type HandlerError = (StatusCode, Json<ErrorBody>);

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PingResponse {
    message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    comment: String,
}

#[derive(Debug, Deserialize)]
pub struct CharactersQuery {
    sort: Option<String>,
    asc: Option<String>,
    filter: Option<String>,
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Map the error taxonomy onto HTTP status codes
fn error_response(e: Error) -> HandlerError {
    let status = match &e {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::UpstreamUnavailable(_) | Error::UpstreamMalformed(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ErrorBody::new(e.to_string())))
}

/// Parse the film id path segment; non-numeric input is invalid
fn parse_film_id(raw: &str) -> Result<u64> {
    raw.parse()
        .map_err(|_| Error::InvalidInput(format!("film id must be numeric, got '{}'", raw)))
}

/// Submitter IP: first X-Forwarded-For entry when present, else peer address
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                let trimmed = first.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
    }

    match peer {
        Some(addr) => addr.ip().to_string(),
        None => "unknown".to_string(),
    }
}

// ============================================================================
// Liveness Endpoints
// ============================================================================

/// GET /ping - liveness probe
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
    })
}

/// GET /health - health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "filmhub".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Film Endpoints
// ============================================================================

/// GET /films - film list with comment counts, newest release first
pub async fn get_films(
    State(ctx): State<AppContext>,
) -> std::result::Result<Json<Envelope<Vec<FilmSummary>>>, HandlerError> {
    match ctx.aggregator().film_summaries().await {
        Ok(data) => Ok(Json(Envelope::success("films retrieved successfully", data))),
        Err(e) => {
            error!("Failed to retrieve film summaries: {}", e);
            Err(error_response(e))
        }
    }
}

/// GET /films/:id/characters - character view with optional sort/filter
pub async fn get_characters(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Query(query): Query<CharactersQuery>,
) -> std::result::Result<Json<Envelope<crate::pipeline::CharacterView>>, HandlerError> {
    let film_id = parse_film_id(&id).map_err(error_response)?;

    // Unrecognized query values fall through to the absent variants
    let sort = SortField::from_query(query.sort.as_deref());
    let direction = SortDirection::from_query(query.asc.as_deref());
    let filter = GenderFilter::from_query(query.filter.as_deref());

    match ctx
        .aggregator()
        .character_view(film_id, sort, direction, filter)
        .await
    {
        Ok(view) => Ok(Json(Envelope::success(
            "characters retrieved successfully",
            view,
        ))),
        Err(e) => {
            error!(film_id, "Failed to build character view: {}", e);
            Err(error_response(e))
        }
    }
}

// ============================================================================
// Comment Endpoints
// ============================================================================

/// GET /films/:id/comments - comments for one film, newest first
pub async fn get_comments(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> std::result::Result<Json<Envelope<Vec<db::comments::CommentRow>>>, HandlerError> {
    let film_id = parse_film_id(&id).map_err(error_response)?;

    match db::comments::list_comments(&ctx.db, film_id).await {
        Ok(data) => Ok(Json(Envelope::success(
            "comments retrieved successfully",
            data,
        ))),
        Err(e) => {
            error!(film_id, "Failed to list comments: {}", e);
            Err(error_response(e))
        }
    }
}

/// POST /films/:id/comments - submit a comment for one film
pub async fn add_comment(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    Json(body): Json<CommentRequest>,
) -> std::result::Result<Json<Envelope<i64>>, HandlerError> {
    let film_id = parse_film_id(&id).map_err(error_response)?;

    if body.comment.chars().count() > MAX_COMMENT_CHARS {
        return Err(error_response(Error::InvalidInput(format!(
            "comment must be no longer than {} characters",
            MAX_COMMENT_CHARS
        ))));
    }

    let ip_address = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));

    match db::comments::insert_comment(&ctx.db, film_id, &body.comment, &ip_address).await {
        Ok(comment_id) => {
            info!(film_id, comment_id, "Comment inserted");
            Ok(Json(Envelope::success(
                "comment inserted successfully",
                comment_id,
            )))
        }
        Err(e) => {
            error!(film_id, "Failed to insert comment: {}", e);
            Err(error_response(e))
        }
    }
}
