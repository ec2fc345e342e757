//! Error types for the org chart engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure an engine operation can surface to its caller.

use thiserror::Error;

use crate::store::StoreError;

/// The main error type for the org chart engine.
///
/// All service operations return this error type, so the transport layer
/// can map failures to responses in one place.
///
/// # Example
///
/// ```
/// use org_chart_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp-404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp-404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No employee exists with the requested ID.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The ID that was looked up.
        employee_id: String,
    },

    /// The employee exists but has no compensation record.
    #[error("No compensation found for employee: {employee_id}")]
    CompensationNotFound {
        /// The employee whose compensation was requested.
        employee_id: String,
    },

    /// A compensation record already exists for the employee.
    #[error("Compensation already exists for employee: {employee_id}")]
    DuplicateCompensation {
        /// The employee that already has a compensation record.
        employee_id: String,
    },

    /// The stored employee moved on while an update was being applied.
    #[error("Employee '{employee_id}' was modified concurrently (expected version {expected}, found {actual})")]
    StaleEmployee {
        /// The employee being updated.
        employee_id: String,
        /// The version the update was based on.
        expected: u64,
        /// The version currently stored.
        actual: u64,
    },

    /// A request field was missing or invalid.
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The backing store failed.
    #[error("Store error: {message}")]
    Store {
        /// A description of the store failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Seed data could not be read or parsed.
    #[error("Failed to load seed data '{path}': {message}")]
    SeedData {
        /// The seed file path.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidArgument`].
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for the not-found family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EmployeeNotFound { .. } | Self::CompensationNotFound { .. }
        )
    }
}

impl From<StoreError> for EngineError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::VersionConflict {
                key,
                expected,
                actual,
            } => EngineError::StaleEmployee {
                employee_id: key,
                expected,
                actual,
            },
            other => EngineError::Store {
                message: other.to_string(),
            },
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
