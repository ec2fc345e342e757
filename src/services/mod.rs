//! Application services.
//!
//! Services sequence store calls and the pure hierarchy/merge logic. They
//! are synchronous; the HTTP layer calls them directly since every store
//! call is a short, in-memory operation.

mod compensation;
mod employees;
mod reporting;
mod update_merge;

pub use compensation::CompensationService;
pub use employees::{EmployeeService, UpdateOutcome};
pub use reporting::ReportingService;
pub use update_merge::{FieldChange, MergeOutcome, merge_employee_update};
