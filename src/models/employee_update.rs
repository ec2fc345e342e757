//! Partial employee updates.

use super::employee::EmployeeId;

/// A partial update to an employee.
///
/// Every attribute is optional: `None` leaves the stored value unchanged,
/// `Some` replaces it. Fields cannot be cleared. `direct_reports`, when
/// present, replaces the whole stored list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New job title.
    pub position: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// Replacement direct report list.
    pub direct_reports: Option<Vec<EmployeeId>>,
    /// Version the client based this update on, if it wants the write
    /// rejected when the record has moved on.
    pub expected_version: Option<u64>,
}

impl EmployeeUpdate {
    /// Returns true when no attribute is present.
    ///
    /// `expected_version` is a precondition, not an attribute, and does not
    /// count.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.position.is_none()
            && self.department.is_none()
            && self.direct_reports.is_none()
    }

    /// Names of the attributes present in this update.
    pub fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.first_name.is_some() {
            fields.push("firstName");
        }
        if self.last_name.is_some() {
            fields.push("lastName");
        }
        if self.position.is_some() {
            fields.push("position");
        }
        if self.department.is_some() {
            fields.push("department");
        }
        if self.direct_reports.is_some() {
            fields.push("directReports");
        }
        fields
    }
}
