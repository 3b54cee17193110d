//! Employee directory collaborator.
//!
//! Employee records are owned by an external system; the engine only needs
//! a read-only view to materialize drafts and resolve department and name
//! filters. [`EmployeeDirectory`] is that seam.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::models::EmployeeRef;

/// Read-only source of employee reference data.
pub trait EmployeeDirectory: Send + Sync {
    /// Returns the employee with the given id, if known.
    fn get(&self, id: &str) -> Option<EmployeeRef>;

    /// Returns all known employees.
    fn all(&self) -> Vec<EmployeeRef>;

    /// Returns all active employees, the generation population.
    fn active(&self) -> Vec<EmployeeRef> {
        self.all().into_iter().filter(|e| e.active).collect()
    }
}

/// In-memory [`EmployeeDirectory`] for tests and default wiring.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    employees: RwLock<HashMap<String, EmployeeRef>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory preloaded with the given employees.
    pub fn with_employees(employees: impl IntoIterator<Item = EmployeeRef>) -> Self {
        let directory = Self::new();
        for employee in employees {
            directory.upsert(employee);
        }
        directory
    }

    /// Adds or replaces an employee snapshot.
    pub fn upsert(&self, employee: EmployeeRef) {
        self.employees
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(employee.id.clone(), employee);
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    fn get(&self, id: &str) -> Option<EmployeeRef> {
        self.employees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn all(&self) -> Vec<EmployeeRef> {
        let mut employees: Vec<EmployeeRef> = self
            .employees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        employees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn employee(id: &str, active: bool) -> EmployeeRef {
        EmployeeRef {
            id: id.to_string(),
            name: format!("Employee {id}"),
            department: "engineering".to_string(),
            basic_salary: Decimal::from(300_000),
            allowances: BTreeMap::new(),
            deductions: BTreeMap::new(),
            payment_method: None,
            active,
        }
    }

    #[test]
    fn test_upsert_and_get() {
        let directory = InMemoryDirectory::new();
        directory.upsert(employee("emp_001", true));
        assert!(directory.get("emp_001").is_some());
        assert!(directory.get("emp_404").is_none());
    }

    #[test]
    fn test_active_excludes_inactive() {
        let directory = InMemoryDirectory::with_employees([
            employee("emp_001", true),
            employee("emp_002", false),
            employee("emp_003", true),
        ]);
        let active = directory.active();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|e| e.active));
    }

    #[test]
    fn test_all_is_sorted_by_id() {
        let directory = InMemoryDirectory::with_employees([
            employee("emp_002", true),
            employee("emp_001", true),
        ]);
        let all = directory.all();
        let ids: Vec<&str> = all.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["emp_001", "emp_002"]);
    }
}
