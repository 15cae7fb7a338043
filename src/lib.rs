//! movies-api - In-memory movies REST API
//!
//! CRUD over a seeded movie collection with request-body validation and an
//! origin allowlist.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod schema;
pub mod store;
