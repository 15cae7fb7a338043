//! # Movies HTTP Server Module
//!
//! Axum server exposing the movie collection over JSON.
//!
//! # Endpoints
//!
//! - `GET /` - Greeting
//! - `GET /movies[?genre=X]` - List, optionally filtered by genre
//! - `GET /movies/:id` - Single movie
//! - `POST /movies` - Create (full validation)
//! - `PATCH /movies/:id` - Update (partial validation)
//! - `DELETE /movies/:id` - Delete
//!
//! Anything else answers 404 `{"message":"Page not found"}`.

pub mod config;
pub mod cors;
pub mod errors;
pub mod movie_routes;
mod request_log;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use cors::OriginGate;
pub use errors::{ApiError, ApiResult, ServerError, ServerResult};
pub use movie_routes::{movie_routes, MovieState};
pub use response::MessageResponse;
pub use server::HttpServer;
