//! Store error types

use thiserror::Error;

/// Result type for store construction
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while building a store from seed data.
///
/// Lookups and mutations never fail with an error: a missing id is reported
/// through `Option`/`bool` so handlers can map it to a 404.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Seed document is not a valid list of movies
    #[error("Invalid seed data: {0}")]
    InvalidSeed(#[from] serde_json::Error),

    /// Two records share an id
    #[error("Duplicate movie id: {0}")]
    DuplicateId(String),
}
