//! Employee creation, lookup and partial update.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::UpdatePolicy;
use crate::error::{EngineError, EngineResult};
use crate::ids::IdGenerator;
use crate::models::{Employee, EmployeeId, EmployeeUpdate, NewEmployee};
use crate::store::{EmployeeStore, StoreError};

use super::update_merge::{FieldChange, merge_employee_update};

/// The stored record after an update and the fields it changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The record as stored after the update.
    pub employee: Employee,
    /// Changed fields keyed by wire name. Empty when nothing was written.
    pub changes: BTreeMap<&'static str, FieldChange>,
}

/// Employee operations over an [`EmployeeStore`].
#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeStore>,
    ids: Arc<dyn IdGenerator>,
    policy: UpdatePolicy,
}

impl EmployeeService {
    /// Creates a service over the given store and ID source.
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        ids: Arc<dyn IdGenerator>,
        policy: UpdatePolicy,
    ) -> Self {
        Self {
            employees,
            ids,
            policy,
        }
    }

    /// Stores a new employee under a freshly generated ID.
    pub fn create(&self, fields: NewEmployee) -> EngineResult<Employee> {
        let employee = Employee::new(EmployeeId::new(self.ids.next_id()), fields);
        let stored = self.employees.insert(employee)?;

        info!(employee_id = %stored.employee_id, "Created employee");
        Ok(stored)
    }

    /// Fetches an employee by ID.
    pub fn get(&self, id: &EmployeeId) -> EngineResult<Employee> {
        debug!(employee_id = %id, "Reading employee");
        self.employees
            .get_by_id(id)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: id.to_string(),
            })
    }

    /// Applies a partial update.
    ///
    /// A missing employee is reported before an empty update. Each attempt reads the record, merges, and compare-and-swaps it back.
    /// When the client pinned a version, a mismatch fails immediately with
    /// [`EngineError::StaleEmployee`]; otherwise a lost race is retried up to
    /// the policy's attempt limit. Updates that change nothing are not
    /// written.
    pub fn update(&self, id: &EmployeeId, update: EmployeeUpdate) -> EngineResult<UpdateOutcome> {
        debug!(employee_id = %id, fields = ?update.present_fields(), "Applying update");

        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let current = self.get(id)?;

            if update.is_empty() && self.policy.reject_empty {
                return Err(EngineError::invalid_argument(
                    "update",
                    "at least one field must be provided",
                ));
            }

            if let Some(expected) = update.expected_version {
                if expected != current.version {
                    return Err(EngineError::StaleEmployee {
                        employee_id: id.to_string(),
                        expected,
                        actual: current.version,
                    });
                }
            }

            let outcome = merge_employee_update(&current, &update)?;
            if !outcome.has_changes() {
                debug!(employee_id = %id, "Update changed nothing, skipping write");
                return Ok(UpdateOutcome {
                    employee: current,
                    changes: BTreeMap::new(),
                });
            }

            match self.employees.save(outcome.merged) {
                Ok(saved) => {
                    info!(
                        employee_id = %id,
                        version = saved.version,
                        changed = ?outcome.changes.keys().collect::<Vec<_>>(),
                        "Updated employee"
                    );
                    return Ok(UpdateOutcome {
                        employee: saved,
                        changes: outcome.changes,
                    });
                }
                Err(StoreError::VersionConflict { actual, .. })
                    if update.expected_version.is_none() && attempt < max_attempts =>
                {
                    warn!(
                        employee_id = %id,
                        attempt,
                        actual,
                        "Employee changed during update, retrying"
                    );
                    attempt += 1;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }
}
