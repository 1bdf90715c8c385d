//! Posterfy API Server
//!
//! Polls the configured movie feeds on a fixed interval and serves the
//! latest snapshot over HTTP.

mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use posterfy_feeds::{HttpFetcher, PosterfyConfig};
use posterfy_services::{FeedAggregator, SnapshotStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<FeedAggregator>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,posterfy_api=debug")),
        )
        .init();

    info!("Starting Posterfy API");

    let config = PosterfyConfig::from_env()?;
    info!(
        "Found config for posterfy '{}' ({} service)",
        config.name,
        config.source.kind()
    );

    let store = Arc::new(SnapshotStore::new());
    let aggregator = Arc::new(FeedAggregator::new(
        Arc::new(HttpFetcher::new()),
        store,
        config,
    ));

    // First cycle runs right away, then every scan interval
    Arc::clone(&aggregator).start();

    let state = AppState { aggregator };

    let app = router(state);

    // Start server
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3002);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the HTTP router
fn router(state: AppState) -> Router {
    // Read-only API, any origin may poll it
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down Posterfy API");
}
