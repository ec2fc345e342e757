//! Compensation model.
//!
//! A compensation record is a one-per-employee satellite of [`Employee`].
//! Stored records reference their employee by ID; reads return
//! [`CompensationDetails`] with a freshly resolved employee hierarchy.
//!
//! [`Employee`]: super::Employee

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::employee::EmployeeId;
use super::reporting_structure::ResolvedEmployee;

/// A stored compensation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    /// Record identifier.
    pub id: String,
    /// The employee this compensation belongs to.
    pub employee_id: EmployeeId,
    /// Annual salary, strictly positive.
    pub salary: Decimal,
    /// The date the compensation takes effect.
    pub effective_date: NaiveDate,
}

/// Salary and effective date as supplied by a client, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCompensation {
    /// Annual salary.
    pub salary: Option<Decimal>,
    /// The date the compensation takes effect.
    pub effective_date: Option<NaiveDate>,
}

impl NewCompensation {
    /// Validates the fields and returns `(salary, effective_date)`.
    pub fn validate(&self) -> EngineResult<(Decimal, NaiveDate)> {
        let salary = self
            .salary
            .ok_or_else(|| EngineError::invalid_argument("salary", "salary is required"))?;
        if salary <= Decimal::ZERO {
            return Err(EngineError::invalid_argument(
                "salary",
                "salary must be positive",
            ));
        }

        let effective_date = self.effective_date.ok_or_else(|| {
            EngineError::invalid_argument("effectiveDate", "effective date is required")
        })?;

        Ok((salary, effective_date))
    }
}

/// A compensation record with the employee's current hierarchy attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationDetails {
    /// Record identifier.
    pub id: String,
    /// The employee, resolved as of this read.
    pub employee: ResolvedEmployee,
    /// Annual salary.
    pub salary: Decimal,
    /// The date the compensation takes effect.
    pub effective_date: NaiveDate,
}

impl CompensationDetails {
    /// Joins a stored record with a resolved employee snapshot.
    pub fn new(compensation: Compensation, employee: ResolvedEmployee) -> Self {
        Self {
            id: compensation.id,
            employee,
            salary: compensation.salary,
            effective_date: compensation.effective_date,
        }
    }
}
