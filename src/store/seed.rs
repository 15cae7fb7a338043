//! Startup seed collection

use crate::schema::Movie;

use super::errors::StoreResult;

const SEED_JSON: &str = include_str!("seed.json");

/// Parses the embedded seed document
pub fn seed_movies() -> StoreResult<Vec<Movie>> {
    Ok(serde_json::from_str(SEED_JSON)?)
}
