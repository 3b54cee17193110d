//! Payroll record model and related vocabulary types.
//!
//! This module defines the [`PayrollRecord`] entity — one per employee per
//! pay period — together with its lifecycle status, payment method, and
//! the monetary breakdown derived by the calculation engine.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;

/// Lifecycle status of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayStatus {
    /// Inputs are editable; the record has not entered the approval flow.
    Draft,
    /// Submitted for approval; inputs are frozen.
    Submitted,
    /// Approved by an approver; awaiting payment.
    Approved,
    /// Rejected by an approver; may be edited and resubmitted.
    Rejected,
    /// Paid out. Terminal.
    Paid,
}

impl fmt::Display for PayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PayStatus::Draft => "draft",
            PayStatus::Submitted => "submitted",
            PayStatus::Approved => "approved",
            PayStatus::Rejected => "rejected",
            PayStatus::Paid => "paid",
        };
        f.write_str(s)
    }
}

/// A workflow action that advances a record through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollAction {
    /// draft → submitted (preparer).
    Submit,
    /// submitted → approved (approver).
    Approve,
    /// submitted → rejected (approver, comment required).
    Reject,
    /// rejected → draft (preparer).
    Resubmit,
    /// approved → paid (approver, payment method required).
    MarkPaid,
}

impl fmt::Display for PayrollAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PayrollAction::Submit => "submit",
            PayrollAction::Approve => "approve",
            PayrollAction::Reject => "reject",
            PayrollAction::Resubmit => "resubmit",
            PayrollAction::MarkPaid => "mark_paid",
        };
        f.write_str(s)
    }
}

/// How an approved record is paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Direct bank transfer.
    BankTransfer,
    /// Cash payment.
    Cash,
    /// Paper cheque.
    Cheque,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Cheque => "cheque",
        };
        f.write_str(s)
    }
}

/// The derived monetary breakdown produced by the calculation engine.
///
/// All fields are rounded to whole currency units, and
/// `net_pay = gross_pay - tax_amount - social_security - health_insurance`
/// holds exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Sum of all earned components before deductions.
    pub gross_pay: Decimal,
    /// Income tax withheld.
    pub tax_amount: Decimal,
    /// Social security contribution.
    pub social_security: Decimal,
    /// Health insurance contribution.
    pub health_insurance: Decimal,
    /// Amount actually payable.
    pub net_pay: Decimal,
}

/// One payroll record: the unit of work, one per employee per pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier. Immutable.
    pub id: Uuid,
    /// Reference to the externally-owned employee entity.
    pub employee_id: String,
    /// The pay period this record covers. Immutable after creation.
    pub period: PayPeriod,
    /// Base salary for the period.
    pub basic_salary: Decimal,
    /// Named allowance components (transport, housing, ...).
    #[serde(default)]
    pub allowances: BTreeMap<String, Decimal>,
    /// Named deduction components (loans, advances, ...).
    #[serde(default)]
    pub deductions: BTreeMap<String, Decimal>,
    /// Overtime pay for the period.
    pub overtime_pay: Decimal,
    /// One-off bonus for the period.
    pub bonus: Decimal,
    /// Derived breakdown; recomputed whenever inputs change while editable.
    pub breakdown: PayBreakdown,
    /// Days worked in the period.
    pub working_days: u32,
    /// Unexcused absent days in the period.
    pub absent_days: u32,
    /// Approved leave days in the period.
    pub leave_days: u32,
    /// Current lifecycle status.
    pub status: PayStatus,
    /// Payment method; required before the record can be marked paid.
    pub payment_method: Option<PaymentMethod>,
    /// Comment recorded by the approve transition.
    pub approval_comment: Option<String>,
    /// Comment recorded by the reject transition.
    pub rejection_comment: Option<String>,
    /// Optimistic concurrency counter; incremented by every write.
    pub version: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Creates a new draft record with zeroed derived fields.
    pub fn new_draft(employee_id: impl Into<String>, period: PayPeriod, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            period,
            basic_salary: Decimal::ZERO,
            allowances: BTreeMap::new(),
            deductions: BTreeMap::new(),
            overtime_pay: Decimal::ZERO,
            bonus: Decimal::ZERO,
            breakdown: PayBreakdown {
                gross_pay: Decimal::ZERO,
                tax_amount: Decimal::ZERO,
                social_security: Decimal::ZERO,
                health_insurance: Decimal::ZERO,
                net_pay: Decimal::ZERO,
            },
            working_days: 0,
            absent_days: 0,
            leave_days: 0,
            status: PayStatus::Draft,
            payment_method: None,
            approval_comment: None,
            rejection_comment: None,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if monetary and attendance inputs may still be edited.
    ///
    /// Inputs are frozen once a record is submitted; rejection returns it
    /// to an editable state.
    pub fn is_editable(&self) -> bool {
        matches!(self.status, PayStatus::Draft | PayStatus::Rejected)
    }

    /// Sum of all deduction components.
    pub fn total_deductions(&self) -> Decimal {
        self.deductions.values().copied().sum()
    }

    /// Sum of all allowance components.
    pub fn total_allowances(&self) -> Decimal {
        self.allowances.values().copied().sum()
    }
}
