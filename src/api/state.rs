//! Application state for the org chart API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::models::Employee;
use crate::services::{CompensationService, EmployeeService, ReportingService};
use crate::store::{
    CompensationStore, EmployeeStore, InMemoryCompensationStore, InMemoryEmployeeStore,
};

/// Shared application state.
///
/// Holds the services every handler dispatches to. Services share their
/// stores, so cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    employees: EmployeeService,
    reporting: ReportingService,
    compensation: CompensationService,
}

impl AppState {
    /// Wires the services over the given stores and ID source, taking the
    /// update policy and hierarchy limits from `config`.
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        compensations: Arc<dyn CompensationStore>,
        ids: Arc<dyn IdGenerator>,
        config: &ServiceConfig,
    ) -> Self {
        Self {
            employees: EmployeeService::new(employees.clone(), ids.clone(), config.updates),
            reporting: ReportingService::new(employees.clone(), config.hierarchy),
            compensation: CompensationService::new(
                employees,
                compensations,
                ids,
                config.hierarchy,
            ),
        }
    }

    /// Builds state over fresh in-memory stores holding `seed`, with UUID
    /// identifiers.
    pub fn in_memory(seed: Vec<Employee>, config: &ServiceConfig) -> Self {
        Self::new(
            Arc::new(InMemoryEmployeeStore::with_records(seed)),
            Arc::new(InMemoryCompensationStore::new()),
            Arc::new(UuidGenerator),
            config,
        )
    }

    /// Employee create/read/update.
    pub fn employees(&self) -> &EmployeeService {
        &self.employees
    }

    /// Reporting structure assembly.
    pub fn reporting(&self) -> &ReportingService {
        &self.reporting
    }

    /// Compensation create/read.
    pub fn compensation(&self) -> &CompensationService {
        &self.compensation
    }
}
