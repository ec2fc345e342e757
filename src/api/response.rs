//! Response types for the org chart API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Message returned for every failure that is not the client's fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the generic server fault response. Carries no details.
    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", INTERNAL_ERROR_MESSAGE)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::EmployeeNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, ApiError::new("EMPLOYEE_NOT_FOUND", message))
            }
            EngineError::CompensationNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("COMPENSATION_NOT_FOUND", message),
            ),
            EngineError::DuplicateCompensation { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "DUPLICATE_COMPENSATION",
                    message,
                    "An employee can have only one compensation record",
                ),
            ),
            EngineError::StaleEmployee { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "STALE_EMPLOYEE",
                    message,
                    "Re-read the employee and retry the update",
                ),
            ),
            EngineError::InvalidArgument { field, message } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid field '{}'", field),
                    message,
                ),
            ),
            EngineError::Store { .. }
            | EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::SeedData { .. } => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiError::internal())
            }
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
}

impl HealthResponse {
    /// The healthy response for this build.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
