//! # Validation Failure Response
//!
//! Error payload returned to the client when a chain rejects a request.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::context::FieldError;

/// Terminal status plus the field errors that led to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub status: StatusCode,
    pub errors: Vec<FieldError>,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub errors: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn new(status: StatusCode, errors: Vec<FieldError>) -> Self {
        Self { status, errors }
    }

    /// Body sent with the status code
    pub fn body(&self) -> ErrorResponse {
        ErrorResponse {
            status: "error",
            errors: self.errors.clone(),
        }
    }
}

impl IntoResponse for ValidationFailure {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = Json(ErrorResponse {
            status: "error",
            errors: self.errors,
        });
        (status, body).into_response()
    }
}
