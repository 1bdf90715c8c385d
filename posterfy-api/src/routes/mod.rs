//! API route definitions

mod health;
mod movies;

use axum::Router;
use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(movies::routes())
        .merge(health::routes())
}
