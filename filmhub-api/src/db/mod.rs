//! Database access layer
//!
//! SQLite comment storage via sqlx. Connection pooling and table bootstrap
//! in `init`, comment queries in `comments`.

pub mod comments;
pub mod init;
