//! Data models for the payroll engine.
//!
//! This module contains the core domain types: the payroll record and its
//! vocabulary enums, the pay period, external employee reference data, and
//! the audit trail entry emitted by workflow transitions.

mod audit;
mod employee;
mod period;
mod record;

pub use audit::{AuditEntry, AuditLog, InMemoryAuditLog};
pub use employee::EmployeeRef;
pub use period::PayPeriod;
pub use record::{PayBreakdown, PayStatus, PaymentMethod, PayrollAction, PayrollRecord};
