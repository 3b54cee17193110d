//! Workflow audit trail.
//!
//! Every successful transition emits an [`AuditEntry`] which is appended
//! to an external, append-only [`AuditLog`]. The engine consumes the log
//! but does not own it; the in-memory implementation here is the default
//! wiring and the test double.

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayStatus;

/// An immutable entry describing one successful workflow transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// The record the transition applied to.
    pub record_id: Uuid,
    /// Status before the transition.
    pub from_status: PayStatus,
    /// Status after the transition.
    pub to_status: PayStatus,
    /// Identifier of the actor who performed the transition.
    pub actor: String,
    /// Comment supplied with the transition, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// When the transition happened.
    pub timestamp: DateTime<Utc>,
}

/// Append-only sink for audit entries.
pub trait AuditLog: Send + Sync {
    /// Appends one entry. Entries are never modified or removed.
    fn append(&self, entry: AuditEntry);

    /// Returns all entries for a record, oldest first.
    fn entries_for(&self, record_id: Uuid) -> Vec<AuditEntry>;
}

/// In-memory audit log.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    entries: RwLock<Vec<AuditEntry>>,
}

impl InMemoryAuditLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no entries have been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditLog for InMemoryAuditLog {
    fn append(&self, entry: AuditEntry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    fn entries_for(&self, record_id: Uuid) -> Vec<AuditEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.record_id == record_id)
            .cloned()
            .collect()
    }
}
