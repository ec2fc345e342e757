use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{Compensation, Employee, EmployeeId};

use super::{CompensationStore, EmployeeStore, StoreError};

fn read_lock<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
    lock.read().map_err(|_| StoreError::Unavailable {
        message: "lock poisoned".to_string(),
    })
}

fn write_lock<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
    lock.write().map_err(|_| StoreError::Unavailable {
        message: "lock poisoned".to_string(),
    })
}

/// In-memory employee store.
///
/// Intended for tests/dev and the default binary. Not optimized for
/// performance.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeStore {
    records: RwLock<HashMap<EmployeeId, Employee>>,
}

impl InMemoryEmployeeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `employees`. Later duplicates
    /// replace earlier ones.
    pub fn with_records(employees: impl IntoIterator<Item = Employee>) -> Self {
        let records = employees
            .into_iter()
            .map(|e| (e.employee_id.clone(), e))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of stored employees.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(read_lock(&self.records)?.len())
    }

    /// Returns true when no employee is stored.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl EmployeeStore for InMemoryEmployeeStore {
    fn get_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, StoreError> {
        Ok(read_lock(&self.records)?.get(id).cloned())
    }

    fn insert(&self, employee: Employee) -> Result<Employee, StoreError> {
        let mut records = write_lock(&self.records)?;
        match records.entry(employee.employee_id.clone()) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateKey {
                key: entry.key().to_string(),
            }),
            Entry::Vacant(entry) => Ok(entry.insert(employee).clone()),
        }
    }

    fn save(&self, mut employee: Employee) -> Result<Employee, StoreError> {
        let mut records = write_lock(&self.records)?;
        match records.entry(employee.employee_id.clone()) {
            Entry::Occupied(mut entry) => {
                let actual = entry.get().version;
                if actual != employee.version {
                    return Err(StoreError::VersionConflict {
                        key: entry.key().to_string(),
                        expected: employee.version,
                        actual,
                    });
                }
                employee.version = actual + 1;
                entry.insert(employee.clone());
                Ok(employee)
            }
            Entry::Vacant(entry) => Ok(entry.insert(employee).clone()),
        }
    }

    fn exists_by_id(&self, id: &EmployeeId) -> Result<bool, StoreError> {
        Ok(read_lock(&self.records)?.contains_key(id))
    }
}

/// In-memory compensation store with a unique key on the employee ID.
#[derive(Debug, Default)]
pub struct InMemoryCompensationStore {
    by_employee: RwLock<HashMap<EmployeeId, Compensation>>,
}

impl InMemoryCompensationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompensationStore for InMemoryCompensationStore {
    fn find_by_employee_id(&self, id: &EmployeeId) -> Result<Option<Compensation>, StoreError> {
        Ok(read_lock(&self.by_employee)?.get(id).cloned())
    }

    fn insert(&self, compensation: Compensation) -> Result<Compensation, StoreError> {
        // Check and insert happen under one write guard.
        let mut records = write_lock(&self.by_employee)?;
        match records.entry(compensation.employee_id.clone()) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateKey {
                key: entry.key().to_string(),
            }),
            Entry::Vacant(entry) => Ok(entry.insert(compensation).clone()),
        }
    }
}
