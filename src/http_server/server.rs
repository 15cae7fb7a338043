//! # HTTP Server
//!
//! Assembles the movie router with its middleware stack and serves it.
//!
//! Request path, outermost first: access log -> origin gate -> CORS
//! headers -> routes.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;

use crate::observability::Logger;
use crate::store::MovieStore;

use super::config::HttpServerConfig;
use super::cors::{enforce_origin, OriginGate};
use super::errors::{ServerError, ServerResult};
use super::movie_routes::{movie_routes, MovieState};
use super::request_log::log_requests;

/// HTTP server for the movies API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the seed collection with default configuration
    pub fn new() -> ServerResult<Self> {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a server over the seed collection
    pub fn with_config(config: HttpServerConfig) -> ServerResult<Self> {
        Ok(Self::with_store(config, MovieStore::seeded()?))
    }

    /// Create a server over an explicit store
    pub fn with_store(config: HttpServerConfig, store: MovieStore) -> Self {
        let router = Self::build_router(&config, MovieState::new(store));
        Self { config, router }
    }

    /// Build the router with all routes and middleware
    fn build_router(config: &HttpServerConfig, state: MovieState) -> Router {
        let gate = OriginGate::new(config.allowed_origins.iter().cloned());

        movie_routes(Arc::new(state))
            .layer(gate.cors_layer())
            .layer(middleware::from_fn_with_state(gate, enforce_origin))
            .layer(middleware::from_fn(log_requests))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server and serve until Ctrl-C
    pub async fn start(self) -> ServerResult<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|_| ServerError::InvalidAddress(self.config.socket_addr()))?;

        let addr_str = addr.to_string();
        Logger::info("SERVER_STARTING", &[("addr", addr_str.as_str())]);

        let listener = TcpListener::bind(addr).await?;
        let local = listener.local_addr()?.to_string();
        Logger::info(
            "SERVER_LISTENING",
            &[("url", format!("http://{}", local).as_str())],
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Logger::info("SERVER_STOPPED", &[]);
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; serve until the process is killed
        std::future::pending::<()>().await;
    }
}
