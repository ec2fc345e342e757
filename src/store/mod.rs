//! Storage ports for employees and compensation records.
//!
//! The engine only talks to storage through these traits. Each call is an
//! atomic unit; no service spans one mutation across two calls.

mod memory;
mod seed;

use thiserror::Error;

use crate::models::{Compensation, Employee, EmployeeId};

pub use memory::{InMemoryCompensationStore, InMemoryEmployeeStore};
pub use seed::{load_seed_file, parse_seed};

/// Errors raised by store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with the same unique key already exists.
    #[error("duplicate key: {key}")]
    DuplicateKey {
        /// The conflicting key.
        key: String,
    },

    /// A compare-and-swap save found a different version than expected.
    #[error("version conflict on {key}: expected {expected}, found {actual}")]
    VersionConflict {
        /// The record key.
        key: String,
        /// The version carried by the write.
        expected: u64,
        /// The version currently stored.
        actual: u64,
    },

    /// The store could not serve the call (timeout, lost connection, ...).
    #[error("store unavailable: {message}")]
    Unavailable {
        /// A description of the failure.
        message: String,
    },
}

/// Keyed storage for employee records.
pub trait EmployeeStore: Send + Sync {
    /// Fetches an employee, or `None` when absent.
    fn get_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, StoreError>;

    /// Inserts a new employee. The ID must already be set; an existing ID
    /// fails with [`StoreError::DuplicateKey`].
    fn insert(&self, employee: Employee) -> Result<Employee, StoreError>;

    /// Upserts keyed by `employee_id`.
    ///
    /// When a record exists its version must equal `employee.version`,
    /// otherwise [`StoreError::VersionConflict`]. The stored copy (with its
    /// bumped version) is returned.
    fn save(&self, employee: Employee) -> Result<Employee, StoreError>;

    /// Returns true when an employee with this ID exists.
    fn exists_by_id(&self, id: &EmployeeId) -> Result<bool, StoreError>;
}

/// Storage for compensation records, unique by employee.
pub trait CompensationStore: Send + Sync {
    /// Fetches the compensation of an employee, or `None` when absent.
    fn find_by_employee_id(&self, id: &EmployeeId) -> Result<Option<Compensation>, StoreError>;

    /// Inserts a record. A second record for the same employee fails with
    /// [`StoreError::DuplicateKey`] keyed by the employee ID.
    fn insert(&self, compensation: Compensation) -> Result<Compensation, StoreError>;
}
