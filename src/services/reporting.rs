//! Reporting structure assembly.

use std::sync::Arc;

use tracing::debug;

use crate::config::HierarchyLimits;
use crate::error::EngineResult;
use crate::hierarchy::{OrgGraph, count_distinct_reports_in_graph, project_tree};
use crate::models::{EmployeeId, ReportingStructure};
use crate::store::EmployeeStore;

/// Builds reporting structures from the employee store.
#[derive(Clone)]
pub struct ReportingService {
    employees: Arc<dyn EmployeeStore>,
    limits: HierarchyLimits,
}

impl ReportingService {
    /// Creates a service over the given store.
    pub fn new(employees: Arc<dyn EmployeeStore>, limits: HierarchyLimits) -> Self {
        Self { employees, limits }
    }

    /// Resolves the hierarchy under `id` and counts its distinct reports.
    ///
    /// The count covers the whole reachable graph, including employees
    /// below a point where the tree was truncated. Fails with
    /// `EmployeeNotFound` when `id` itself does not exist.
    pub fn reporting_structure(&self, id: &EmployeeId) -> EngineResult<ReportingStructure> {
        let graph = OrgGraph::load(self.employees.as_ref(), id)?;
        let number_of_reports = count_distinct_reports_in_graph(&graph);
        let resolution = project_tree(&graph, self.limits);

        debug!(
            employee_id = %id,
            number_of_reports,
            dangling = resolution.dangling.len(),
            limit_cuts = resolution.limit_cuts.len(),
            "Built reporting structure"
        );

        Ok(ReportingStructure {
            employee: resolution.tree,
            number_of_reports,
        })
    }
}
