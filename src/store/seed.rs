//! Seed data loading.
//!
//! Seed files are JSON arrays of employee records using the same camelCase
//! field names as the HTTP API. `directReports` entries may be bare IDs or
//! `{ "employeeId": ... }` objects.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeId, NewEmployee, ReportRef, collect_report_ids};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecord {
    employee_id: EmployeeId,
    first_name: Option<String>,
    last_name: Option<String>,
    position: Option<String>,
    department: Option<String>,
    #[serde(default)]
    direct_reports: Option<Vec<ReportRef>>,
}

impl SeedRecord {
    fn into_employee(self) -> EngineResult<Employee> {
        let fields = NewEmployee::validate(
            self.first_name,
            self.last_name,
            self.position,
            self.department,
            collect_report_ids(self.direct_reports),
        )?;
        Ok(Employee::new(self.employee_id, fields))
    }
}

/// Reads and parses a seed file.
pub fn load_seed_file<P: AsRef<Path>>(path: P) -> EngineResult<Vec<Employee>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|e| EngineError::SeedData {
        path: path_str.clone(),
        message: e.to_string(),
    })?;

    parse_seed(&content).map_err(|e| match e {
        EngineError::SeedData { message, .. } => EngineError::SeedData {
            path: path_str,
            message,
        },
        other => other,
    })
}

/// Parses seed records from a JSON string.
///
/// Every record must carry the four required fields; the first invalid
/// record fails the whole load.
pub fn parse_seed(content: &str) -> EngineResult<Vec<Employee>> {
    let records: Vec<SeedRecord> =
        serde_json::from_str(content).map_err(|e| EngineError::SeedData {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;

    records.into_iter().map(SeedRecord::into_employee).collect()
}
