//! Compensation creation and lookup.
//!
//! Each employee has at most one compensation record. The compensation
//! store's unique key on the employee ID is authoritative; a
//! [`StoreError::DuplicateKey`] from the insert is reported the same way as
//! a record found by the pre-check.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::HierarchyLimits;
use crate::error::{EngineError, EngineResult};
use crate::hierarchy::resolve_hierarchy;
use crate::ids::IdGenerator;
use crate::models::{Compensation, CompensationDetails, EmployeeId, NewCompensation};
use crate::store::{CompensationStore, EmployeeStore, StoreError};

/// Compensation operations over the employee and compensation stores.
#[derive(Clone)]
pub struct CompensationService {
    employees: Arc<dyn EmployeeStore>,
    compensations: Arc<dyn CompensationStore>,
    ids: Arc<dyn IdGenerator>,
    limits: HierarchyLimits,
}

impl CompensationService {
    /// Creates a service over the given stores and ID source.
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        compensations: Arc<dyn CompensationStore>,
        ids: Arc<dyn IdGenerator>,
        limits: HierarchyLimits,
    ) -> Self {
        Self {
            employees,
            compensations,
            ids,
            limits,
        }
    }

    /// Records the compensation of an existing employee.
    ///
    /// Errors, in precedence order: `EmployeeNotFound`,
    /// `DuplicateCompensation`, `InvalidArgument`.
    pub fn create(
        &self,
        employee_id: &EmployeeId,
        request: NewCompensation,
    ) -> EngineResult<CompensationDetails> {
        self.ensure_employee_exists(employee_id)?;

        if self
            .compensations
            .find_by_employee_id(employee_id)?
            .is_some()
        {
            return Err(EngineError::DuplicateCompensation {
                employee_id: employee_id.to_string(),
            });
        }

        let (salary, effective_date) = request.validate()?;
        let snapshot = resolve_hierarchy(self.employees.as_ref(), employee_id, self.limits)?.tree;

        let compensation = Compensation {
            id: self.ids.next_id(),
            employee_id: employee_id.clone(),
            salary,
            effective_date,
        };

        let stored = match self.compensations.insert(compensation) {
            Ok(stored) => stored,
            Err(StoreError::DuplicateKey { .. }) => {
                warn!(employee_id = %employee_id, "Concurrent compensation create rejected");
                return Err(EngineError::DuplicateCompensation {
                    employee_id: employee_id.to_string(),
                });
            }
            Err(error) => return Err(error.into()),
        };

        info!(
            employee_id = %employee_id,
            compensation_id = %stored.id,
            "Created compensation"
        );
        Ok(CompensationDetails::new(stored, snapshot))
    }

    /// Reads an employee's compensation with the current hierarchy attached.
    ///
    /// A missing employee is reported before a missing record.
    pub fn get(&self, employee_id: &EmployeeId) -> EngineResult<CompensationDetails> {
        self.ensure_employee_exists(employee_id)?;

        let compensation = self
            .compensations
            .find_by_employee_id(employee_id)?
            .ok_or_else(|| EngineError::CompensationNotFound {
                employee_id: employee_id.to_string(),
            })?;

        debug!(employee_id = %employee_id, "Reading compensation");
        let snapshot = resolve_hierarchy(self.employees.as_ref(), employee_id, self.limits)?.tree;
        Ok(CompensationDetails::new(compensation, snapshot))
    }

    fn ensure_employee_exists(&self, employee_id: &EmployeeId) -> EngineResult<()> {
        if self.employees.exists_by_id(employee_id)? {
            Ok(())
        } else {
            Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;
    use crate::models::{Employee, NewEmployee};
    use crate::store::{InMemoryCompensationStore, InMemoryEmployeeStore};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::thread;

    fn employee(id: &str, reports: Option<&[&str]>) -> Employee {
        let fields = NewEmployee::validate(
            Some(id.to_string()),
            Some("Last".to_string()),
            Some("Musician".to_string()),
            Some("Band".to_string()),
            reports.map(|r| r.iter().map(|s| EmployeeId::from(*s)).collect()),
        )
        .unwrap();
        Employee::new(EmployeeId::from(id), fields)
    }

    fn request(salary: &str) -> NewCompensation {
        NewCompensation {
            salary: Some(Decimal::from_str(salary).unwrap()),
            effective_date: NaiveDate::from_ymd_opt(2025, 1, 1),
        }
    }

    fn setup(
        employees: impl IntoIterator<Item = Employee>,
    ) -> (CompensationService, Arc<InMemoryEmployeeStore>) {
        let store = Arc::new(InMemoryEmployeeStore::with_records(employees));
        let service = CompensationService::new(
            store.clone(),
            Arc::new(InMemoryCompensationStore::new()),
            Arc::new(SequentialIdGenerator::new("comp")),
            HierarchyLimits::default(),
        );
        (service, store)
    }

    #[test]
    fn test_create_returns_record_with_snapshot() {
        let (service, _) = setup([employee("john", Some(&["paul"])), employee("paul", None)]);

        let details = service
            .create(&EmployeeId::from("john"), request("120000.50"))
            .unwrap();

        assert_eq!(details.id, "comp-1");
        assert_eq!(details.salary, Decimal::from_str("120000.50").unwrap());
        assert_eq!(details.employee.employee_id.as_str(), "john");
        assert_eq!(details.employee.reports().count(), 1);
    }

    #[test]
    fn test_create_for_missing_employee_is_not_found() {
        let (service, _) = setup([]);
        let result = service.create(&EmployeeId::from("nobody"), request("100"));
        assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
    }

    #[test]
    fn test_second_create_is_duplicate_and_keeps_first() {
        let (service, _) = setup([employee("ringo", None)]);
        let id = EmployeeId::from("ringo");

        let first = service.create(&id, request("100")).unwrap();
        let second = service.create(&id, request("200"));

        assert!(matches!(
            second,
            Err(EngineError::DuplicateCompensation { .. })
        ));
        let stored = service.get(&id).unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.salary, Decimal::from(100));
    }

    #[test]
    fn test_duplicate_takes_precedence_over_invalid_salary() {
        let (service, _) = setup([employee("ringo", None)]);
        let id = EmployeeId::from("ringo");
        service.create(&id, request("100")).unwrap();

        let result = service.create(&id, request("-5"));
        assert!(matches!(
            result,
            Err(EngineError::DuplicateCompensation { .. })
        ));
    }

    #[test]
    fn test_non_positive_salary_is_rejected() {
        let (service, _) = setup([employee("ringo", None)]);

        for salary in ["0", "-1"] {
            match service.create(&EmployeeId::from("ringo"), request(salary)) {
                Err(EngineError::InvalidArgument { field, .. }) => assert_eq!(field, "salary"),
                other => panic!("Expected InvalidArgument, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_date_is_rejected() {
        let (service, _) = setup([employee("ringo", None)]);
        let result = service.create(
            &EmployeeId::from("ringo"),
            NewCompensation {
                salary: Some(Decimal::from(100)),
                effective_date: None,
            },
        );

        match result {
            Err(EngineError::InvalidArgument { field, .. }) => assert_eq!(field, "effectiveDate"),
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_get_distinguishes_missing_employee_and_missing_record() {
        let (service, _) = setup([employee("ringo", None)]);

        assert!(matches!(
            service.get(&EmployeeId::from("nobody")),
            Err(EngineError::EmployeeNotFound { .. })
        ));
        assert!(matches!(
            service.get(&EmployeeId::from("ringo")),
            Err(EngineError::CompensationNotFound { .. })
        ));
    }

    #[test]
    fn test_get_attaches_current_hierarchy() {
        let (service, store) = setup([employee("john", None), employee("paul", None)]);
        let id = EmployeeId::from("john");
        service.create(&id, request("100")).unwrap();

        let mut john = store.get_by_id(&id).unwrap().unwrap();
        john.direct_reports = Some(vec![EmployeeId::from("paul")]);
        store.save(john).unwrap();

        let details = service.get(&id).unwrap();
        assert_eq!(details.employee.reports().count(), 1);
    }

    #[test]
    fn test_concurrent_creates_allow_exactly_one() {
        let (service, _) = setup([employee("ringo", None)]);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = service.clone();
                thread::spawn(move || {
                    service.create(&EmployeeId::from("ringo"), request(&format!("{}", 100 + i)))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let created = results.iter().filter(|r| r.is_ok()).count();
        let duplicates = results
            .iter()
            .filter(|r| matches!(r, Err(EngineError::DuplicateCompensation { .. })))
            .count();

        assert_eq!(created, 1);
        assert_eq!(duplicates, 15);
    }
}
