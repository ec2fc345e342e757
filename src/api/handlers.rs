//! HTTP request handlers for the org chart API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{EmployeeId, NewEmployee};

use super::request::{CompensationRequest, CreateEmployeeRequest, UpdateEmployeeRequest};
use super::response::{ApiError, ApiErrorResponse, HealthResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/employee", post(create_employee_handler))
        .route(
            "/employee/:id",
            get(get_employee_handler).put(update_employee_handler),
        )
        .route(
            "/employee/:id/reporting-structure",
            get(reporting_structure_handler),
        )
        .route(
            "/employee/:id/compensation",
            get(get_compensation_handler).post(create_compensation_handler),
        )
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

/// Handler for POST /employee.
///
/// Validates the body and stores the employee under a generated ID.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create employee request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = NewEmployee::try_from(request).and_then(|fields| state.employees().create(fields));
    respond(correlation_id, result)
}

/// Handler for GET /employee/:id.
async fn get_employee_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    debug!(correlation_id = %correlation_id, employee_id = %id, "Processing get employee request");

    respond(correlation_id, state.employees().get(&EmployeeId::from(id)))
}

/// Handler for PUT /employee/:id.
///
/// Applies a partial update; the response is the employee as stored.
async fn update_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Processing update employee request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = state
        .employees()
        .update(&EmployeeId::from(id), request.into())
        .map(|outcome| {
            info!(
                correlation_id = %correlation_id,
                changes = outcome.changes.len(),
                "Update applied"
            );
            outcome.employee
        });
    respond(correlation_id, result)
}

/// Handler for GET /employee/:id/reporting-structure.
async fn reporting_structure_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    debug!(correlation_id = %correlation_id, employee_id = %id, "Processing reporting structure request");

    respond(
        correlation_id,
        state.reporting().reporting_structure(&EmployeeId::from(id)),
    )
}

/// Handler for POST /employee/:id/compensation.
async fn create_compensation_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CompensationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Processing create compensation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    respond(
        correlation_id,
        state
            .compensation()
            .create(&EmployeeId::from(id), request.into()),
    )
}

/// Handler for GET /employee/:id/compensation.
async fn get_compensation_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    debug!(correlation_id = %correlation_id, employee_id = %id, "Processing get compensation request");

    respond(correlation_id, state.compensation().get(&EmployeeId::from(id)))
}

/// Turns a service result into a JSON response, logging failures.
fn respond<T: Serialize>(correlation_id: Uuid, result: Result<T, EngineError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            let message = err.to_string();
            let api_error = ApiErrorResponse::from(err);
            if api_error.status.is_server_error() {
                error!(correlation_id = %correlation_id, error = %message, "Request failed");
            } else {
                warn!(correlation_id = %correlation_id, error = %message, "Request rejected");
            }
            api_error.into_response()
        }
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        // Request fields are all optional, so a data error is a type
        // mismatch; missing fields are reported by domain validation.
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::malformed_json(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::models::{Employee, ReportingStructure};
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::in_memory(Vec::new(), &ServiceConfig::default())
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        router.oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let response = send(create_router(create_test_state()), "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let health: HealthResponse = read_json(response).await;
        assert_eq!(health.status, "ok");
    }

    #[tokio::test]
    async fn test_create_then_get_employee() {
        let router = create_router(create_test_state());

        let response = send(
            router.clone(),
            "POST",
            "/employee",
            Some(
                r#"{"firstName":"Ringo","lastName":"Starr","position":"Drummer","department":"Band"}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let created: Employee = read_json(response).await;

        let response = send(
            router,
            "GET",
            &format!("/employee/{}", created.employee_id),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: Employee = read_json(response).await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_employee_missing_fields_returns_400() {
        let response = send(
            create_router(create_test_state()),
            "POST",
            "/employee",
            Some(r#"{"firstName":"Ringo"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("lastName"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let response = send(
            create_router(create_test_state()),
            "POST",
            "/employee",
            Some("{invalid json"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_wrong_field_type_returns_400() {
        let response = send(
            create_router(create_test_state()),
            "POST",
            "/employee",
            Some(r#"{"firstName": 42}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_salary_is_validation_error() {
        let router = create_router(create_test_state());
        let response = send(
            router.clone(),
            "POST",
            "/employee",
            Some(
                r#"{"firstName":"Ringo","lastName":"Starr","position":"Drummer","department":"Band"}"#,
            ),
        )
        .await;
        let created: Employee = read_json(response).await;

        let response = send(
            router,
            "POST",
            &format!("/employee/{}/compensation", created.employee_id),
            Some(r#"{"effectiveDate":"2025-01-01"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("salary"));
    }

    #[tokio::test]
    async fn test_unknown_employee_returns_404() {
        let router = create_router(create_test_state());

        for uri in [
            "/employee/nobody",
            "/employee/nobody/reporting-structure",
            "/employee/nobody/compensation",
        ] {
            let response = send(router.clone(), "GET", uri, None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            let error: ApiError = read_json(response).await;
            assert_eq!(error.code, "EMPLOYEE_NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn test_reporting_structure_for_new_employee() {
        let router = create_router(create_test_state());
        let response = send(
            router.clone(),
            "POST",
            "/employee",
            Some(
                r#"{"firstName":"Ringo","lastName":"Starr","position":"Drummer","department":"Band"}"#,
            ),
        )
        .await;
        let created: Employee = read_json(response).await;

        let response = send(
            router,
            "GET",
            &format!("/employee/{}/reporting-structure", created.employee_id),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let structure: ReportingStructure = read_json(response).await;
        assert_eq!(structure.number_of_reports, 0);
        assert_eq!(structure.employee.direct_reports, None);
    }
}
