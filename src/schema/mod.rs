//! Movie schema: record types and body validation
//!
//! Request bodies are untyped JSON until they pass through this module.
//!
//! # Design Principles
//!
//! - Validation is a value, never a panic or an early abort
//! - All violations are collected in one pass
//! - Bounds are enforced on write only; stored records are trusted
//! - Unknown keys are stripped, `null` is a type error

mod errors;
mod types;
mod validator;

pub use errors::{IssueCode, PathSegment, ValidationErrors, Violation};
pub use types::{Genre, Movie, MoviePatch, NewMovie, UnknownGenre, DEFAULT_RATE};
pub use validator::{
    validate_movie, validate_partial_movie, Validation, MAX_RATE, MAX_YEAR, MIN_RATE, MIN_YEAR,
};
