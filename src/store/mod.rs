//! Record storage seam.
//!
//! The engine is storage-agnostic: everything above this module talks to
//! the [`RecordStore`] trait, whose writes are conditioned on the version
//! the caller last read. Only the in-memory implementation ships; a
//! relational or key-value backend slots in behind the same trait.

mod directory;
mod memory;

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{PayPeriod, PayStatus, PaymentMethod, PayrollRecord};

pub use directory::{EmployeeDirectory, InMemoryDirectory};
pub use memory::InMemoryRecordStore;

/// Filter applied when listing or exporting records.
///
/// Department and employee-name filters are resolved by the API layer into
/// the `employee_ids` set via the directory, keeping the store independent
/// of employee data.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Restrict to one pay period.
    pub period: Option<PayPeriod>,
    /// Restrict to one lifecycle status.
    pub status: Option<PayStatus>,
    /// Restrict to one payment method.
    pub payment_method: Option<PaymentMethod>,
    /// Restrict to a set of employee ids.
    pub employee_ids: Option<HashSet<String>>,
}

impl RecordFilter {
    /// Returns true if the record passes every set criterion.
    pub fn matches(&self, record: &PayrollRecord) -> bool {
        if let Some(period) = self.period {
            if record.period != period {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        if let Some(method) = self.payment_method {
            if record.payment_method != Some(method) {
                return false;
            }
        }
        if let Some(ids) = &self.employee_ids {
            if !ids.contains(&record.employee_id) {
                return false;
            }
        }
        true
    }
}

/// Durable store of payroll records with optimistic concurrency control.
pub trait RecordStore: Send + Sync {
    /// Inserts a new record, enforcing one record per `(employee, period)`.
    ///
    /// Fails with `DuplicateRecord` when that pair already has a record.
    fn insert(&self, record: PayrollRecord) -> EngineResult<()>;

    /// Fetches a record by id, failing with `NotFound`.
    fn get(&self, id: Uuid) -> EngineResult<PayrollRecord>;

    /// Looks up the record for an employee and period, if any.
    fn find_by_employee_period(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> Option<PayrollRecord>;

    /// Lists records matching the filter, ordered by employee id.
    fn list(&self, filter: &RecordFilter) -> Vec<PayrollRecord>;

    /// Replaces a record if and only if the stored version equals
    /// `expected_version`.
    ///
    /// The caller passes the record with its version already advanced; a
    /// mismatch fails with `ConcurrentModification` and leaves the store
    /// unchanged.
    fn update(&self, expected_version: u64, record: PayrollRecord) -> EngineResult<PayrollRecord>;

    /// Removes a record permanently. Administrative purge only.
    fn remove(&self, id: Uuid) -> EngineResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_empty_filter_matches_everything() {
        let period = PayPeriod::month(2026, 1).unwrap();
        let record = PayrollRecord::new_draft("emp_001", period, Utc::now());
        assert!(RecordFilter::default().matches(&record));
    }

    #[test]
    fn test_filter_by_period_status_and_ids() {
        let period = PayPeriod::month(2026, 1).unwrap();
        let record = PayrollRecord::new_draft("emp_001", period, Utc::now());

        let mut filter = RecordFilter {
            period: Some(period),
            status: Some(PayStatus::Draft),
            ..Default::default()
        };
        assert!(filter.matches(&record));

        filter.status = Some(PayStatus::Paid);
        assert!(!filter.matches(&record));

        filter.status = None;
        filter.employee_ids = Some(["emp_002".to_string()].into());
        assert!(!filter.matches(&record));
    }

    #[test]
    fn test_filter_by_payment_method_requires_one_set() {
        let period = PayPeriod::month(2026, 1).unwrap();
        let record = PayrollRecord::new_draft("emp_001", period, Utc::now());
        let filter = RecordFilter {
            payment_method: Some(PaymentMethod::Cash),
            ..Default::default()
        };
        // Record has no payment method yet.
        assert!(!filter.matches(&record));
    }
}
