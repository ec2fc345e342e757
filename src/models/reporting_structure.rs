//! Resolved hierarchy views.
//!
//! These types are built fresh on every request and never persisted.

use serde::{Deserialize, Serialize};

use super::employee::{Employee, EmployeeId};

/// An employee with every reachable direct report embedded.
///
/// `direct_reports` mirrors the stored record's absent/empty distinction:
/// `None` when the stored list is absent, `Some` otherwise (possibly empty
/// after dangling references are skipped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEmployee {
    /// Unique identifier.
    pub employee_id: EmployeeId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Job title.
    pub position: String,
    /// Department name.
    pub department: String,
    /// Resolved direct reports.
    pub direct_reports: Option<Vec<ResolvedEmployee>>,
}

impl ResolvedEmployee {
    /// Copies the scalar fields of `employee` and sets the given reports.
    pub fn from_record(employee: &Employee, direct_reports: Option<Vec<ResolvedEmployee>>) -> Self {
        Self {
            employee_id: employee.employee_id.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            direct_reports,
        }
    }

    /// Iterates over the resolved direct reports, treating absent as empty.
    pub fn reports(&self) -> impl Iterator<Item = &ResolvedEmployee> {
        self.direct_reports.iter().flatten()
    }
}

/// An employee's resolved hierarchy and distinct descendant count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingStructure {
    /// The resolved hierarchy rooted at the requested employee.
    pub employee: ResolvedEmployee,
    /// Number of distinct employees below the root.
    pub number_of_reports: usize,
}
