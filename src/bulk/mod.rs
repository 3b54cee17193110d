//! Bulk operation coordinator.
//!
//! Applies one workflow transition to a set of records with per-record
//! isolation: each id is read, transitioned and compare-and-swapped
//! independently, so one record's failure never aborts the rest. The
//! fan-out runs on rayon's thread pool; no cross-record lock exists
//! because every write is guarded by the record's own version.

use chrono::Utc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AuditLog, PayrollAction};
use crate::store::RecordStore;
use crate::workflow::{apply_transition, Actor};

/// Outcome of one record within a bulk operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BulkOutcome {
    /// The transition was applied and committed.
    Succeeded {
        /// The record's version after the transition.
        version: u64,
    },
    /// The transition was not applied to this record.
    Failed {
        /// Machine-readable failure code.
        code: String,
        /// Human-readable failure reason.
        reason: String,
    },
}

/// One entry of a bulk report, in the same order as the request ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkItemResult {
    /// The record the outcome applies to.
    pub id: Uuid,
    /// Success or a specific failure reason.
    #[serde(flatten)]
    pub outcome: BulkOutcome,
}

/// The full report of a bulk operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkReport {
    /// The action that was applied.
    pub action: PayrollAction,
    /// Number of records that transitioned.
    pub succeeded: usize,
    /// Number of records that failed.
    pub failed: usize,
    /// Per-record outcomes, in request order.
    pub items: Vec<BulkItemResult>,
}

fn failure_code(error: &EngineError) -> &'static str {
    match error {
        EngineError::InvalidInput { .. } => "invalid_input",
        EngineError::IllegalTransition { .. } => "illegal_transition",
        EngineError::ConcurrentModification { .. } => "concurrent_modification",
        EngineError::NotFound { .. } => "not_found",
        EngineError::DuplicateRecord { .. } => "duplicate_record",
        EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => "config_error",
    }
}

/// Applies `action` to every id in `ids`, returning per-record outcomes.
///
/// Each record is processed independently: read, transition on a clone,
/// compare-and-swap back, audit on success. Transitions already committed
/// stay committed regardless of later failures in the batch.
pub fn apply_bulk(
    store: &dyn RecordStore,
    audit: &dyn AuditLog,
    ids: &[Uuid],
    action: PayrollAction,
    actor: &Actor,
    comment: Option<&str>,
) -> BulkReport {
    let items: Vec<BulkItemResult> = ids
        .par_iter()
        .map(|&id| {
            let outcome = apply_one(store, audit, id, action, actor, comment);
            BulkItemResult { id, outcome }
        })
        .collect();

    let succeeded = items
        .iter()
        .filter(|i| matches!(i.outcome, BulkOutcome::Succeeded { .. }))
        .count();
    let failed = items.len() - succeeded;

    info!(
        action = %action,
        total = items.len(),
        succeeded,
        failed,
        "Bulk operation completed"
    );

    BulkReport {
        action,
        succeeded,
        failed,
        items,
    }
}

fn apply_one(
    store: &dyn RecordStore,
    audit: &dyn AuditLog,
    id: Uuid,
    action: PayrollAction,
    actor: &Actor,
    comment: Option<&str>,
) -> BulkOutcome {
    let result = (|| {
        let record = store.get(id)?;
        let read_version = record.version;
        let mut updated = record;
        let entry = apply_transition(&mut updated, action, actor, comment, Utc::now())?;
        let committed = store.update(read_version, updated)?;
        audit.append(entry);
        Ok::<u64, EngineError>(committed.version)
    })();

    match result {
        Ok(version) => BulkOutcome::Succeeded { version },
        Err(error) => BulkOutcome::Failed {
            code: failure_code(&error).to_string(),
            reason: error.to_string(),
        },
    }
}
