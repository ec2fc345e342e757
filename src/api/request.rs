//! Request types for the org chart API.
//!
//! Every attribute is optional at the JSON level. Required fields are
//! checked by the engine's validation, which names all missing fields in one
//! error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{EmployeeUpdate, NewCompensation, NewEmployee, ReportRef, collect_report_ids};

/// Request body for `POST /employee`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Job title.
    pub position: Option<String>,
    /// Department name.
    pub department: Option<String>,
    /// Direct reports as IDs or `{ "employeeId": ... }` objects.
    #[serde(default)]
    pub direct_reports: Option<Vec<ReportRef>>,
}

impl TryFrom<CreateEmployeeRequest> for NewEmployee {
    type Error = EngineError;

    fn try_from(req: CreateEmployeeRequest) -> Result<Self, Self::Error> {
        NewEmployee::validate(
            req.first_name,
            req.last_name,
            req.position,
            req.department,
            collect_report_ids(req.direct_reports),
        )
    }
}

/// Request body for `PUT /employee/{id}`.
///
/// Omitted and `null` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New job title.
    pub position: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// Replacement direct report list.
    #[serde(default)]
    pub direct_reports: Option<Vec<ReportRef>>,
    /// The record version this update was based on.
    #[serde(default)]
    pub version: Option<u64>,
}

impl From<UpdateEmployeeRequest> for EmployeeUpdate {
    fn from(req: UpdateEmployeeRequest) -> Self {
        EmployeeUpdate {
            first_name: req.first_name,
            last_name: req.last_name,
            position: req.position,
            department: req.department,
            direct_reports: collect_report_ids(req.direct_reports),
            expected_version: req.version,
        }
    }
}

/// Request body for `POST /employee/{id}/compensation`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationRequest {
    /// Annual salary, as a JSON number or decimal string.
    pub salary: Option<Decimal>,
    /// ISO-8601 date the compensation takes effect.
    pub effective_date: Option<NaiveDate>,
}

impl From<CompensationRequest> for NewCompensation {
    fn from(req: CompensationRequest) -> Self {
        NewCompensation {
            salary: req.salary,
            effective_date: req.effective_date,
        }
    }
}
