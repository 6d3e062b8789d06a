//! Comment storage
//!
//! One table keyed by film id (the catalog's episode number) holding
//! free-text comments with submitter IP and creation timestamp. Inserts are
//! independent rows; no deduplication or rate limiting. Length validation
//! (≤500 characters) happens at the HTTP layer before reaching the store.

use filmhub_common::Result;
use serde::Serialize;
use sqlx::{FromRow, Pool, Sqlite};

/// A stored comment as returned to API callers
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentRow {
    pub comment: String,
    pub ip_address: String,
    pub created_at: String,
}

/// Insert one comment, returning its row id
pub async fn insert_comment(
    db: &Pool<Sqlite>,
    film_id: u64,
    comment: &str,
    ip_address: &str,
) -> Result<i64> {
    let result = sqlx::query("INSERT INTO comments (film_id, comment, ip_address) VALUES (?, ?, ?)")
        .bind(film_id as i64)
        .bind(comment)
        .bind(ip_address)
        .execute(db)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Count comments for one film (exact match on film id)
pub async fn count_comments(db: &Pool<Sqlite>, film_id: u64) -> Result<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE film_id = ?")
        .bind(film_id as i64)
        .fetch_one(db)
        .await?;

    Ok(count as u64)
}

/// List comments for one film, newest first
pub async fn list_comments(db: &Pool<Sqlite>, film_id: u64) -> Result<Vec<CommentRow>> {
    let rows = sqlx::query_as::<_, CommentRow>(
        "SELECT comment, ip_address, created_at FROM comments \
         WHERE film_id = ? ORDER BY created_at DESC",
    )
    .bind(film_id as i64)
    .fetch_all(db)
    .await?;

    Ok(rows)
}
