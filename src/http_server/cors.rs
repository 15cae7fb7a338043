//! Origin allowlist
//!
//! Requests without an `Origin` header (curl, server-to-server) always pass.
//! Requests with one pass only if it equals an allowlist entry exactly,
//! scheme, host, and port included. Everything else is rejected with 403
//! before routing; the CORS headers on allowed responses are produced by
//! `tower_http`'s `CorsLayer`, driven by the same allowlist.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::Logger;

use super::errors::{ApiError, ApiResult};

/// Exact-match origin allowlist
#[derive(Debug, Clone)]
pub struct OriginGate {
    allowed: Arc<[String]>,
}

impl OriginGate {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: origins.into_iter().map(Into::into).collect(),
        }
    }

    /// True if `origin` is on the allowlist
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed.iter().any(|o| o == origin)
    }

    /// Decides whether a request declaring `origin` may proceed
    pub fn check(&self, origin: Option<&str>) -> ApiResult<()> {
        match origin {
            None => Ok(()),
            Some(o) if self.is_allowed(o) => Ok(()),
            Some(o) => Err(ApiError::OriginNotAllowed(o.to_string())),
        }
    }

    /// CORS response headers for allowed origins, including preflight replies
    pub fn cors_layer(&self) -> CorsLayer {
        let gate = self.clone();
        let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _: &Parts| {
            origin.to_str().map(|o| gate.is_allowed(o)).unwrap_or(false)
        });

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers(Any)
    }
}

/// Middleware rejecting requests whose origin fails the gate
pub async fn enforce_origin(
    State(gate): State<OriginGate>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(err) = gate.check(request_origin(&request)) {
        if let ApiError::OriginNotAllowed(origin) = &err {
            Logger::warn(
                "ORIGIN_REJECTED",
                &[
                    ("method", request.method().as_str()),
                    ("origin", origin.as_str()),
                    ("path", request.uri().path()),
                ],
            );
        }
        return err.into_response();
    }

    next.run(request).await
}

// A header that is not valid UTF-8 can never equal an allowlist entry.
/// An empty `Origin` header counts as no origin
fn request_origin(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::ORIGIN)
        .map(|value| value.to_str().unwrap_or_default())
        .filter(|origin| !origin.is_empty())
}
