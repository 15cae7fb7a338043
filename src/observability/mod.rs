//! Observability for the movies API
//!
//! Structured JSON logging only. Logging is read-only with respect to
//! request handling and never changes a response.
//!
//! # Usage
//!
//! ```ignore
//! use movies_api::observability::Logger;
//!
//! Logger::info("MOVIE_CREATED", &[("id", &movie.id)]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
