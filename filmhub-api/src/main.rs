//! filmhub-api - Main entry point
//!
//! Backend aggregator for a public film catalog: fetches films and
//! characters from the upstream catalog, enriches films with user-submitted
//! comments stored in SQLite, memoizes the film-summary aggregate, and
//! serves the combined data over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filmhub_api::api;
use filmhub_api::cache::ResultCache;
use filmhub_api::catalog::{CatalogClient, DEFAULT_CATALOG_BASE_URL};
use filmhub_api::config::Config;
use filmhub_api::db;

/// Command-line arguments for filmhub-api
#[derive(Parser, Debug)]
#[command(name = "filmhub-api")]
#[command(about = "Film catalog aggregator service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "FILMHUB_PORT")]
    port: u16,

    /// Path to the SQLite database file
    #[arg(short, long, default_value = "filmhub.db", env = "FILMHUB_DB_PATH")]
    db_path: PathBuf,

    /// Base URL of the upstream film catalog
    #[arg(long, default_value = DEFAULT_CATALOG_BASE_URL, env = "FILMHUB_CATALOG_URL")]
    catalog_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "filmhub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();
    let config = Config {
        port: args.port,
        db_path: args.db_path,
        catalog_base_url: args.catalog_url,
    };

    info!("Starting filmhub on port {}", config.port);
    info!("Database: {}", config.db_path.display());
    info!("Catalog: {}", config.catalog_base_url);

    // Open database and bootstrap tables
    let db_pool = db::init::init_database(&config.db_path)
        .await
        .context("Failed to initialize database")?;

    // Upstream catalog client (TLS verification on by default)
    let catalog = Arc::new(
        CatalogClient::new(config.catalog_base_url.clone())
            .context("Failed to create catalog client")?,
    );

    // Build the application router
    let ctx = api::server::AppContext::new(db_pool, catalog, ResultCache::new());
    let app = api::server::build_router(ctx);

    // Bind and serve; ConnectInfo supplies peer addresses for comment IPs
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
