//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::PayrollRates;
use crate::models::AuditLog;
use crate::store::{EmployeeDirectory, RecordStore};

/// Shared application state.
///
/// Contains the record store, the external employee directory, the
/// append-only audit log, and the configured statutory rates.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RecordStore>,
    directory: Arc<dyn EmployeeDirectory>,
    audit: Arc<dyn AuditLog>,
    rates: Arc<PayrollRates>,
}

impl AppState {
    /// Creates a new application state from its collaborators.
    pub fn new(
        store: Arc<dyn RecordStore>,
        directory: Arc<dyn EmployeeDirectory>,
        audit: Arc<dyn AuditLog>,
        rates: PayrollRates,
    ) -> Self {
        Self {
            store,
            directory,
            audit,
            rates: Arc::new(rates),
        }
    }

    /// Returns the record store.
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Returns the employee directory.
    pub fn directory(&self) -> &dyn EmployeeDirectory {
        self.directory.as_ref()
    }

    /// Returns the audit log.
    pub fn audit(&self) -> &dyn AuditLog {
        self.audit.as_ref()
    }

    /// Returns the configured rates.
    pub fn rates(&self) -> &PayrollRates {
        &self.rates
    }
}
