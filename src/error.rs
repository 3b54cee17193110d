//! Error types for the Payroll Processing & Approval Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing, transitioning,
//! importing or exporting payroll records.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{PayStatus, PayrollAction};

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "basic_salary".to_string(),
///     message: "must not be negative".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid input for field 'basic_salary': must not be negative"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A monetary or attendance input was malformed or out of range.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A workflow transition was attempted from a state, or by a role,
    /// that the transition table does not permit.
    #[error("Illegal transition: cannot apply '{action}' to a record in status '{status}'")]
    IllegalTransition {
        /// The current status of the record.
        status: PayStatus,
        /// The action that was attempted.
        action: PayrollAction,
    },

    /// A write was conditioned on a version the store no longer holds.
    #[error(
        "Concurrent modification of record {record_id}: expected version {expected}, found {actual}"
    )]
    ConcurrentModification {
        /// The record that was concurrently modified.
        record_id: Uuid,
        /// The version the caller last read.
        expected: u64,
        /// The version currently held by the store.
        actual: u64,
    },

    /// No record exists with the given identifier.
    #[error("Payroll record not found: {record_id}")]
    NotFound {
        /// The unknown record identifier.
        record_id: Uuid,
    },

    /// A record already exists for the given employee and period.
    #[error("Payroll record already exists for employee '{employee_id}' in period {period}")]
    DuplicateRecord {
        /// The employee the duplicate was attempted for.
        employee_id: String,
        /// The pay period, in canonical string form.
        period: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or contained invalid rates.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "overtime_pay".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input for field 'overtime_pay': must not be negative"
        );
    }

    #[test]
    fn test_illegal_transition_displays_status_and_action() {
        let error = EngineError::IllegalTransition {
            status: PayStatus::Submitted,
            action: PayrollAction::MarkPaid,
        };
        assert_eq!(
            error.to_string(),
            "Illegal transition: cannot apply 'mark_paid' to a record in status 'submitted'"
        );
    }

    #[test]
    fn test_concurrent_modification_displays_versions() {
        let id = Uuid::nil();
        let error = EngineError::ConcurrentModification {
            record_id: id,
            expected: 3,
            actual: 4,
        };
        let text = error.to_string();
        assert!(text.contains("expected version 3"));
        assert!(text.contains("found 4"));
    }

    #[test]
    fn test_not_found_displays_record_id() {
        let id = Uuid::nil();
        let error = EngineError::NotFound { record_id: id };
        assert!(error.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_duplicate_record_displays_employee_and_period() {
        let error = EngineError::DuplicateRecord {
            employee_id: "emp_001".to_string(),
            period: "2026-01".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Payroll record already exists for employee 'emp_001' in period 2026-01"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rates.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rates.yaml"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::NotFound {
                record_id: Uuid::nil(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
