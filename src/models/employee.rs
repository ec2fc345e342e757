//! Employee model and related types.
//!
//! This module defines the stored [`Employee`] record, its identifier and
//! the validated field set used to create one.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Opaque, globally unique employee identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Wraps a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EmployeeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for EmployeeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A reference to another employee as it may appear on the wire.
///
/// Clients and seed files send direct reports either as bare IDs or as
/// objects carrying an `employeeId`; both collapse to an [`EmployeeId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportRef {
    /// A bare identifier.
    Id(EmployeeId),
    /// An object carrying the identifier.
    #[serde(rename_all = "camelCase")]
    Object {
        /// The referenced employee.
        employee_id: EmployeeId,
    },
}

impl From<ReportRef> for EmployeeId {
    fn from(value: ReportRef) -> Self {
        match value {
            ReportRef::Id(id) => id,
            ReportRef::Object { employee_id } => employee_id,
        }
    }
}

/// Collapses an optional list of wire references into IDs, keeping the
/// absent/empty distinction.
pub fn collect_report_ids(refs: Option<Vec<ReportRef>>) -> Option<Vec<EmployeeId>> {
    refs.map(|refs| refs.into_iter().map(Into::into).collect())
}

/// A stored employee record.
///
/// `direct_reports` holds references by ID, never embedded employees.
/// `None` means the reports are unknown/not set; `Some(vec![])` means the
/// employee is known to have no reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier, assigned at creation.
    pub employee_id: EmployeeId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Job title.
    pub position: String,
    /// Department name.
    pub department: String,
    /// IDs of the employees reporting directly to this one.
    pub direct_reports: Option<Vec<EmployeeId>>,
    /// Optimistic concurrency counter, bumped by every successful save.
    #[serde(default = "initial_version")]
    pub version: u64,
}

fn initial_version() -> u64 {
    1
}

impl Employee {
    /// Builds a new record from validated fields.
    pub fn new(employee_id: EmployeeId, fields: NewEmployee) -> Self {
        Self {
            employee_id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            position: fields.position,
            department: fields.department,
            direct_reports: fields.direct_reports,
            version: initial_version(),
        }
    }

    /// Iterates over the direct report IDs, treating absent as empty.
    pub fn report_ids(&self) -> impl Iterator<Item = &EmployeeId> {
        self.direct_reports.iter().flatten()
    }
}

/// The fields a client supplies to create an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Job title.
    pub position: String,
    /// Department name.
    pub department: String,
    /// Optional direct report IDs.
    pub direct_reports: Option<Vec<EmployeeId>>,
}

impl NewEmployee {
    /// Validates that every required field is present and non-blank.
    ///
    /// All missing fields are reported together, in declaration order.
    pub fn validate(
        first_name: Option<String>,
        last_name: Option<String>,
        position: Option<String>,
        department: Option<String>,
        direct_reports: Option<Vec<EmployeeId>>,
    ) -> EngineResult<Self> {
        let mut missing = Vec::new();
        let first_name = required("firstName", first_name, &mut missing);
        let last_name = required("lastName", last_name, &mut missing);
        let position = required("position", position, &mut missing);
        let department = required("department", department, &mut missing);

        if !missing.is_empty() {
            return Err(EngineError::invalid_argument(
                missing.join(", "),
                "required field missing or blank",
            ));
        }

        Ok(Self {
            first_name,
            last_name,
            position,
            department,
            direct_reports,
        })
    }
}

fn required(name: &'static str, value: Option<String>, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}
