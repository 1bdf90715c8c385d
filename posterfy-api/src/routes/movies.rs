//! Movie feed endpoint

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use posterfy_core::MovieRecord;

use crate::AppState;

/// Sensor-style view of the published snapshot
#[derive(Debug, Serialize)]
struct MoviesResponse {
    /// Instance name
    name: String,
    /// Completion time of the last successful refresh
    state: Option<DateTime<Utc>>,
    available: bool,
    movies: Vec<MovieRecord>,
}

/// GET /api/movies - latest aggregated movie list
async fn get_movies(State(state): State<AppState>) -> Json<MoviesResponse> {
    let snapshot = state.aggregator.snapshot();

    Json(MoviesResponse {
        name: state.aggregator.config().name.clone(),
        state: snapshot.last_refreshed,
        available: snapshot.available,
        movies: snapshot.movies.clone(),
    })
}

/// Create movie routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/movies", get(get_movies))
}
