//! # Response Bodies
//!
//! JSON bodies shared by handlers and error responses.

use serde::Serialize;

use crate::schema::ValidationErrors;

/// `{"message": ...}` body used for greetings, confirmations, and 404s
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{"error": [violations]}` body returned with 400
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub error: ValidationErrors,
}
