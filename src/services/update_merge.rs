//! Partial update merging.
//!
//! Applies an [`EmployeeUpdate`] onto a stored [`Employee`] field by field.
//! Absent fields are left alone; present fields replace the stored value and
//! are recorded as changed only when the value actually differs.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeId, EmployeeUpdate};

/// A single field's before and after values, rendered for logs and clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Value before the merge.
    pub from: String,
    /// Value after the merge.
    pub to: String,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// The merged record and the fields whose values changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The record to persist. Its version is the stored version it was
    /// merged from.
    pub merged: Employee,
    /// Changed fields keyed by their wire name.
    pub changes: BTreeMap<&'static str, FieldChange>,
}

impl MergeOutcome {
    /// Returns true when the merge changed at least one value.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Merges `update` onto `current` without touching the store.
///
/// Present scalar fields must be non-blank: a blank value would clear the
/// field, which updates do not support.
pub fn merge_employee_update(
    current: &Employee,
    update: &EmployeeUpdate,
) -> EngineResult<MergeOutcome> {
    let mut merged = current.clone();
    let mut changes = BTreeMap::new();

    merge_scalar("firstName", &mut merged.first_name, &update.first_name, &mut changes)?;
    merge_scalar("lastName", &mut merged.last_name, &update.last_name, &mut changes)?;
    merge_scalar("position", &mut merged.position, &update.position, &mut changes)?;
    merge_scalar("department", &mut merged.department, &update.department, &mut changes)?;

    if let Some(reports) = &update.direct_reports {
        if merged.direct_reports.as_ref() != Some(reports) {
            changes.insert(
                "directReports",
                FieldChange {
                    from: render_reports(merged.direct_reports.as_deref()),
                    to: render_reports(Some(reports.as_slice())),
                },
            );
            merged.direct_reports = Some(reports.clone());
        }
    }

    Ok(MergeOutcome { merged, changes })
}

fn merge_scalar(
    name: &'static str,
    target: &mut String,
    value: &Option<String>,
    changes: &mut BTreeMap<&'static str, FieldChange>,
) -> EngineResult<()> {
    let Some(value) = value else {
        return Ok(());
    };

    if value.trim().is_empty() {
        return Err(EngineError::invalid_argument(name, "must not be blank"));
    }

    if *target != *value {
        changes.insert(
            name,
            FieldChange {
                from: target.clone(),
                to: value.clone(),
            },
        );
        *target = value.clone();
    }

    Ok(())
}

fn render_reports(reports: Option<&[EmployeeId]>) -> String {
    match reports {
        None => "null".to_string(),
        Some(ids) => {
            let ids: Vec<&str> = ids.iter().map(EmployeeId::as_str).collect();
            format!("[{}]", ids.join(", "))
        }
    }
}
