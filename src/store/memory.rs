//! In-memory record store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, PayrollRecord};

use super::{RecordFilter, RecordStore};

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<Uuid, PayrollRecord>,
    // (employee_id, period) uniqueness index.
    by_employee_period: HashMap<(String, PayPeriod), Uuid>,
}

/// Thread-safe in-memory [`RecordStore`] implementation.
///
/// Writes are serialized behind an `RwLock`; the compare-and-swap in
/// [`RecordStore::update`] is what gives callers optimistic concurrency.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Inner>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn insert(&self, record: PayrollRecord) -> EngineResult<()> {
        let mut inner = self.write();
        let key = (record.employee_id.clone(), record.period);
        if inner.by_employee_period.contains_key(&key) {
            return Err(EngineError::DuplicateRecord {
                employee_id: record.employee_id.clone(),
                period: record.period.to_string(),
            });
        }
        inner.by_employee_period.insert(key, record.id);
        inner.records.insert(record.id, record);
        Ok(())
    }

    fn get(&self, id: Uuid) -> EngineResult<PayrollRecord> {
        self.read()
            .records
            .get(&id)
            .cloned()
            .ok_or(EngineError::NotFound { record_id: id })
    }

    fn find_by_employee_period(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> Option<PayrollRecord> {
        let inner = self.read();
        let id = inner
            .by_employee_period
            .get(&(employee_id.to_string(), period))?;
        inner.records.get(id).cloned()
    }

    fn list(&self, filter: &RecordFilter) -> Vec<PayrollRecord> {
        let inner = self.read();
        let mut records: Vec<PayrollRecord> = inner
            .records
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            a.employee_id
                .cmp(&b.employee_id)
                .then_with(|| a.period.cmp(&b.period))
        });
        records
    }

    fn update(&self, expected_version: u64, record: PayrollRecord) -> EngineResult<PayrollRecord> {
        let mut inner = self.write();
        let current = inner
            .records
            .get_mut(&record.id)
            .ok_or(EngineError::NotFound {
                record_id: record.id,
            })?;
        if current.version != expected_version {
            return Err(EngineError::ConcurrentModification {
                record_id: record.id,
                expected: expected_version,
                actual: current.version,
            });
        }
        *current = record.clone();
        Ok(record)
    }

    fn remove(&self, id: Uuid) -> EngineResult<()> {
        let mut inner = self.write();
        let record = inner
            .records
            .remove(&id)
            .ok_or(EngineError::NotFound { record_id: id })?;
        inner
            .by_employee_period
            .remove(&(record.employee_id, record.period));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayStatus;
    use chrono::Utc;

    fn record(employee_id: &str, month: u32) -> PayrollRecord {
        let period = PayPeriod::month(2026, month).unwrap();
        PayrollRecord::new_draft(employee_id, period, Utc::now())
    }

    #[test]
    fn test_insert_and_get() {
        let store = InMemoryRecordStore::new();
        let r = record("emp_001", 1);
        let id = r.id;
        store.insert(r).unwrap();
        assert_eq!(store.get(id).unwrap().employee_id, "emp_001");
    }

    #[test]
    fn test_duplicate_employee_period_rejected() {
        let store = InMemoryRecordStore::new();
        store.insert(record("emp_001", 1)).unwrap();
        let err = store.insert(record("emp_001", 1)).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateRecord { .. }));
        // A different period for the same employee is fine.
        store.insert(record("emp_001", 2)).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let store = InMemoryRecordStore::new();
        let err = store.get(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[test]
    fn test_find_by_employee_period() {
        let store = InMemoryRecordStore::new();
        let r = record("emp_001", 1);
        let id = r.id;
        store.insert(r).unwrap();

        let period = PayPeriod::month(2026, 1).unwrap();
        assert_eq!(
            store.find_by_employee_period("emp_001", period).unwrap().id,
            id
        );
        assert!(store.find_by_employee_period("emp_002", period).is_none());
    }

    #[test]
    fn test_list_is_sorted_and_filtered() {
        let store = InMemoryRecordStore::new();
        store.insert(record("emp_002", 1)).unwrap();
        store.insert(record("emp_001", 1)).unwrap();
        let mut submitted = record("emp_003", 1);
        submitted.status = PayStatus::Submitted;
        store.insert(submitted).unwrap();

        let all = store.list(&RecordFilter::default());
        let ids: Vec<&str> = all.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["emp_001", "emp_002", "emp_003"]);

        let drafts = store.list(&RecordFilter {
            status: Some(PayStatus::Draft),
            ..Default::default()
        });
        assert_eq!(drafts.len(), 2);
    }

    #[test]
    fn test_update_cas_succeeds_on_matching_version() {
        let store = InMemoryRecordStore::new();
        let mut r = record("emp_001", 1);
        store.insert(r.clone()).unwrap();

        r.status = PayStatus::Submitted;
        r.version = 2;
        let updated = store.update(1, r).unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(store.get(updated.id).unwrap().status, PayStatus::Submitted);
    }

    #[test]
    fn test_update_cas_fails_on_stale_version() {
        let store = InMemoryRecordStore::new();
        let mut r = record("emp_001", 1);
        store.insert(r.clone()).unwrap();

        // First writer wins.
        let mut first = r.clone();
        first.version = 2;
        store.update(1, first).unwrap();

        // Second writer raced on the same version 1 read.
        r.version = 2;
        let err = store.update(1, r).unwrap_err();
        match err {
            EngineError::ConcurrentModification {
                expected, actual, ..
            } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 2);
            }
            other => panic!("expected ConcurrentModification, got {other}"),
        }
    }

    #[test]
    fn test_concurrent_cas_exactly_one_wins() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryRecordStore::new());
        let r = record("emp_001", 1);
        let id = r.id;
        store.insert(r).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    // Every thread conditions its write on the initial read.
                    let mut r = store.get(id).unwrap();
                    r.version = 2;
                    store.update(1, r).is_ok()
                })
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(store.get(id).unwrap().version, 2);
    }

    #[test]
    fn test_remove_frees_employee_period_slot() {
        let store = InMemoryRecordStore::new();
        let r = record("emp_001", 1);
        let id = r.id;
        store.insert(r).unwrap();
        store.remove(id).unwrap();
        assert!(store.is_empty());
        // The slot is reusable after a purge.
        store.insert(record("emp_001", 1)).unwrap();
    }
}
