//! Employee reference data.
//!
//! The engine never owns employee records; it consumes a read-only
//! snapshot supplied by an external directory. [`EmployeeRef`] carries the
//! fields payroll generation and filtering need, nothing more.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PaymentMethod;

/// Read-only reference to an externally-owned employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRef {
    /// Unique identifier in the external system.
    pub id: String,
    /// Display name, used for payslips and name filtering.
    pub name: String,
    /// Department the employee belongs to.
    pub department: String,
    /// Monthly base salary used when materializing draft records.
    pub basic_salary: Decimal,
    /// Recurring allowance components applied to generated drafts.
    #[serde(default)]
    pub allowances: BTreeMap<String, Decimal>,
    /// Recurring deduction components applied to generated drafts.
    #[serde(default)]
    pub deductions: BTreeMap<String, Decimal>,
    /// Preferred payment method, copied onto generated drafts.
    pub payment_method: Option<PaymentMethod>,
    /// Whether the employee is active; only active employees get drafts.
    pub active: bool,
}
