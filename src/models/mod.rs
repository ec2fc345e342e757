//! Core data models for the org chart engine.
//!
//! This module contains all the domain models used throughout the engine.

mod compensation;
mod employee;
mod employee_update;
mod reporting_structure;

pub use compensation::{Compensation, CompensationDetails, NewCompensation};
pub use employee::{Employee, EmployeeId, NewEmployee, ReportRef, collect_report_ids};
pub use employee_update::EmployeeUpdate;
pub use reporting_structure::{ReportingStructure, ResolvedEmployee};
