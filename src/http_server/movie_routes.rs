//! Movie HTTP Routes
//!
//! List/filter, get, create, patch, and delete over the movie store, plus
//! the home greeting and the 404 fallback.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, MethodRouter},
    Json, Router,
};
use serde_json::{Map, Value};

use crate::observability::Logger;
use crate::schema::{validate_movie, validate_partial_movie, Movie, ValidationErrors};
use crate::store::{MovieStore, StoreResult};

use super::errors::{ApiError, ApiResult};
use super::response::MessageResponse;

// ==================
// Shared State
// ==================

/// State shared across movie handlers
#[derive(Debug)]
pub struct MovieState {
    pub store: MovieStore,
}

impl MovieState {
    pub fn new(store: MovieStore) -> Self {
        Self { store }
    }

    /// State over the embedded seed collection
    pub fn seeded() -> StoreResult<Self> {
        Ok(Self::new(MovieStore::seeded()?))
    }
}

// ==================
// Movie Routes
// ==================

/// Create movie routes.
///
/// A known path with an unsupported method answers like an unknown path.
/// Movie paths also match with one trailing slash.
pub fn movie_routes(state: Arc<MovieState>) -> Router {
    Router::new()
        .route("/", get(home_handler).fallback(page_not_found_handler))
        .route("/movies", collection_routes())
        .route("/movies/", collection_routes())
        .route("/movies/:id", item_routes())
        .route("/movies/:id/", item_routes())
        .fallback(page_not_found_handler)
        .with_state(state)
}

fn collection_routes() -> MethodRouter<Arc<MovieState>> {
    get(list_movies_handler)
        .post(create_movie_handler)
        .fallback(page_not_found_handler)
}

fn item_routes() -> MethodRouter<Arc<MovieState>> {
    get(get_movie_handler)
        .patch(update_movie_handler)
        .delete(delete_movie_handler)
        .fallback(page_not_found_handler)
}

// ==================
// Helper Functions
// ==================

/// Parses a request body. An empty body reads as `{}`.
fn parse_body(body: &[u8]) -> ApiResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidJson(e.to_string()))
}

fn rejected(errors: ValidationErrors) -> ApiError {
    let fields = errors.fields().join(",");
    Logger::info("VALIDATION_FAILED", &[("fields", fields.as_str())]);
    ApiError::Validation(errors)
}

// ==================
// Handlers
// ==================

async fn home_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("Home page"))
}

async fn list_movies_handler(
    State(state): State<Arc<MovieState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Movie>> {
    let movies = match params.get("genre").filter(|g| !g.is_empty()) {
        Some(genre) => state.store.filter_by_genre(genre),
        None => state.store.all(),
    };
    Json(movies)
}

async fn get_movie_handler(
    State(state): State<Arc<MovieState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Movie>> {
    state.store.find(&id).map(Json).ok_or(ApiError::MovieNotFound)
}

async fn create_movie_handler(
    State(state): State<Arc<MovieState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Movie>)> {
    let input = parse_body(&body)?;
    let new_movie = validate_movie(&input).map_err(rejected)?;

    let movie = state.store.create(new_movie);
    Logger::info(
        "MOVIE_CREATED",
        &[("id", movie.id.as_str()), ("title", movie.title.as_str())],
    );

    Ok((StatusCode::CREATED, Json(movie)))
}

async fn update_movie_handler(
    State(state): State<Arc<MovieState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Movie>> {
    let input = parse_body(&body)?;
    let patch = validate_partial_movie(&input).map_err(rejected)?;

    let movie = state.store.update(&id, patch).ok_or(ApiError::MovieNotFound)?;
    Logger::info("MOVIE_UPDATED", &[("id", movie.id.as_str())]);

    Ok(Json(movie))
}

async fn delete_movie_handler(
    State(state): State<Arc<MovieState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.store.remove(&id) {
        return Err(ApiError::MovieNotFound);
    }
    Logger::info("MOVIE_DELETED", &[("id", id.as_str())]);

    Ok(Json(MessageResponse::new("Movie deleted")))
}

async fn page_not_found_handler() -> ApiError {
    ApiError::PageNotFound
}
