//! Movie collection store
//!
//! Holds the process-lifetime collection. State is initialized from an
//! embedded seed at startup and discarded on exit; there is no persistence.

mod collection;
mod errors;
mod seed;

pub use collection::MovieStore;
pub use errors::{StoreError, StoreResult};
pub use seed::seed_movies;
