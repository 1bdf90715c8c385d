//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    available: bool,
    last_refreshed: Option<DateTime<Utc>>,
    movie_count: usize,
}

/// Health check handler: degraded while the last refresh cycle failed
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let snapshot = state.aggregator.snapshot();

    let (code, status) = if snapshot.available {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let response = HealthResponse {
        status: status.to_string(),
        available: snapshot.available,
        last_refreshed: snapshot.last_refreshed,
        movie_count: snapshot.movies.len(),
    };

    (code, Json(response))
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
