//! HTTP API module for the org chart engine.
//!
//! This module provides the REST endpoints for employees, reporting
//! structures and compensation records.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CompensationRequest, CreateEmployeeRequest, UpdateEmployeeRequest};
pub use response::{ApiError, HealthResponse, INTERNAL_ERROR_MESSAGE};
pub use state::AppState;
