//! # HTTP Errors
//!
//! `ApiError` covers everything a request can fail with and knows its own
//! status code and body. `ServerError` covers startup failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::schema::{IssueCode, ValidationErrors, Violation};
use crate::store::StoreError;

use super::response::{MessageResponse, ValidationErrorResponse};

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Request-level errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body failed schema validation
    #[error("Invalid movie: {0}")]
    Validation(#[from] ValidationErrors),

    /// Body is not parseable JSON
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    /// No record with the requested id
    #[error("Movie not found")]
    MovieNotFound,

    /// No route for method + path
    #[error("Page not found")]
    PageNotFound,

    /// Cross-origin request from an origin outside the allowlist
    #[error("Not allowed by CORS")]
    OriginNotAllowed(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::MovieNotFound => StatusCode::NOT_FOUND,
            ApiError::PageNotFound => StatusCode::NOT_FOUND,
            ApiError::OriginNotAllowed(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => {
                (status, Json(ValidationErrorResponse { error: errors })).into_response()
            }
            ApiError::InvalidJson(reason) => {
                let error = Violation::root(IssueCode::InvalidJson, reason).into();
                (status, Json(ValidationErrorResponse { error })).into_response()
            }
            other => (status, Json(MessageResponse::new(other.to_string()))).into_response(),
        }
    }
}

/// Result type for server startup
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that stop the server from starting
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid PORT value: '{0}'")]
    InvalidPort(String),

    #[error("Invalid socket address: {0}")]
    InvalidAddress(String),

    #[error("Failed to load movies: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation(ValidationErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::MovieNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::PageNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::OriginNotAllowed("https://evil.com".into()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = ApiError::MovieNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"message": "Movie not found"}));
    }

    #[tokio::test]
    async fn test_validation_body() {
        let errors = ValidationErrors::from(Violation::field(
            IssueCode::InvalidType,
            "title",
            "Title is required.",
        ));
        let response = ApiError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"][0]["path"], json!(["title"]));
        assert_eq!(body["error"][0]["code"], "invalid_type");
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let response = ApiError::InvalidJson("expected value".into()).into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"][0]["code"], "invalid_json");
        assert_eq!(body["error"][0]["path"], json!([]));
    }

    #[tokio::test]
    async fn test_origin_body_hides_origin() {
        let response = ApiError::OriginNotAllowed("https://evil.com".into()).into_response();
        assert_eq!(body_json(response).await, json!({"message": "Not allowed by CORS"}));
    }
}
