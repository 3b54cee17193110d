//! Workflow controller: the payroll record state machine.
//!
//! States run `draft -> submitted -> approved -> paid`, with a single
//! backward edge `rejected -> draft` (resubmit). Each transition is gated
//! by the actor's role and a guard; anything outside the table fails with
//! `IllegalTransition` and leaves the record untouched.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditEntry, PayStatus, PayrollAction, PayrollRecord};

/// The role an actor holds with respect to the payroll workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Prepares and submits records (e.g. HR).
    Preparer,
    /// Approves, rejects and settles records (e.g. finance).
    Approver,
}

/// An actor attempting a workflow transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Identifier of the actor in the external system.
    pub id: String,
    /// The actor's workflow role.
    pub role: ActorRole,
}

/// Looks up the transition table: `(status, action)` to (next status,
/// required role). `None` means the transition does not exist.
fn transition_for(status: PayStatus, action: PayrollAction) -> Option<(PayStatus, ActorRole)> {
    use PayStatus::*;
    use PayrollAction::*;
    match (status, action) {
        (Draft, Submit) => Some((Submitted, ActorRole::Preparer)),
        (Submitted, Approve) => Some((Approved, ActorRole::Approver)),
        (Submitted, Reject) => Some((Rejected, ActorRole::Approver)),
        (Rejected, Resubmit) => Some((Draft, ActorRole::Preparer)),
        (Approved, MarkPaid) => Some((Paid, ActorRole::Approver)),
        _ => None,
    }
}

/// Applies one workflow transition to a record.
///
/// On success the record's status is updated, the relevant comment field is
/// set, `version` is incremented, `updated_at` is stamped, and the
/// [`AuditEntry`] for the append-only log is returned. On any failure the
/// record is left exactly as it was.
///
/// # Errors
///
/// - `IllegalTransition` when `(status, action)` is not in the table or the
///   actor's role does not match.
/// - `InvalidInput` when a guard fails: submitting without a positive basic
///   salary or a computed breakdown, rejecting without a comment, or
///   marking paid without a payment method.
pub fn apply_transition(
    record: &mut PayrollRecord,
    action: PayrollAction,
    actor: &Actor,
    comment: Option<&str>,
    now: DateTime<Utc>,
) -> EngineResult<AuditEntry> {
    let from_status = record.status;

    let (to_status, required_role) =
        transition_for(from_status, action).ok_or(EngineError::IllegalTransition {
            status: from_status,
            action,
        })?;

    if actor.role != required_role {
        return Err(EngineError::IllegalTransition {
            status: from_status,
            action,
        });
    }

    check_guard(record, action, comment)?;

    record.status = to_status;
    match action {
        PayrollAction::Approve => {
            record.approval_comment = comment.map(str::to_string);
        }
        PayrollAction::Reject => {
            record.rejection_comment = comment.map(str::to_string);
        }
        _ => {}
    }
    record.version += 1;
    record.updated_at = now;

    Ok(AuditEntry {
        record_id: record.id,
        from_status,
        to_status,
        actor: actor.id.clone(),
        comment: comment.map(str::to_string),
        timestamp: now,
    })
}

fn check_guard(
    record: &PayrollRecord,
    action: PayrollAction,
    comment: Option<&str>,
) -> EngineResult<()> {
    match action {
        PayrollAction::Submit => {
            if record.basic_salary <= Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: "basic_salary".to_string(),
                    message: "must be present and positive before submitting".to_string(),
                });
            }
            if record.breakdown.gross_pay <= Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: "breakdown".to_string(),
                    message: "net pay must be computed before submitting".to_string(),
                });
            }
        }
        PayrollAction::Reject => {
            if comment.map(str::trim).filter(|c| !c.is_empty()).is_none() {
                return Err(EngineError::InvalidInput {
                    field: "comment".to_string(),
                    message: "a rejection comment is required".to_string(),
                });
            }
        }
        PayrollAction::MarkPaid => {
            if record.payment_method.is_none() {
                return Err(EngineError::InvalidInput {
                    field: "payment_method".to_string(),
                    message: "a payment method must be set before marking paid".to_string(),
                });
            }
        }
        PayrollAction::Approve | PayrollAction::Resubmit => {}
    }
    Ok(())
}

/// Fails with `IllegalTransition` when a record's inputs are frozen.
///
/// Input edits are only allowed in `draft` and `rejected`; callers that
/// mutate monetary or attendance fields go through this check first.
pub fn ensure_editable(record: &PayrollRecord) -> EngineResult<()> {
    if record.is_editable() {
        Ok(())
    } else {
        Err(EngineError::IllegalTransition {
            status: record.status,
            action: PayrollAction::Resubmit,
        })
    }
}
