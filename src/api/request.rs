//! Request types for the payroll engine API.

use serde::Deserialize;
use uuid::Uuid;

use crate::models::{PayPeriod, PayStatus, PaymentMethod, PayrollAction};
use crate::workflow::Actor;

/// Query parameters accepted by `GET /payroll` and `GET /payroll/export`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Restrict to one pay period (canonical or legacy `YYYY-MM` form).
    pub period: Option<PayPeriod>,
    /// Restrict to one lifecycle status.
    pub status: Option<PayStatus>,
    /// Restrict to records of employees in this department.
    pub department: Option<String>,
    /// Restrict to one payment method.
    pub payment_method: Option<PaymentMethod>,
    /// Restrict to employees whose name contains this text
    /// (case-insensitive).
    pub employee_name: Option<String>,
}

/// Body of `POST /payroll/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// The pay period to materialize draft records for.
    pub period: PayPeriod,
}

/// Body of the single-record transition endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionRequest {
    /// Who is performing the transition.
    pub actor: Actor,
    /// Transition comment; required for reject, optional for approve.
    pub comment: Option<String>,
    /// The version the caller last read. When omitted, the freshly-read
    /// version is used as the optimistic token.
    pub version: Option<u64>,
}

/// Body of `POST /payroll/bulk`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkRequest {
    /// The records to transition.
    pub ids: Vec<Uuid>,
    /// The transition to apply to every record.
    pub action: PayrollAction,
    /// Who is performing the transitions.
    pub actor: Actor,
    /// Comment applied to every transition, if any.
    pub comment: Option<String>,
}
