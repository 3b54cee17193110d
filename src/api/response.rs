//! Response types for the payroll engine API.
//!
//! This module defines the error response structures, the HTTP status
//! mapping for engine errors, and the generation report body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{PayPeriod, PayrollRecord};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match &error {
            EngineError::InvalidInput { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    error.to_string(),
                    format!("The field '{field}' failed validation"),
                ),
            },
            EngineError::IllegalTransition { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("ILLEGAL_TRANSITION", error.to_string()),
            },
            EngineError::ConcurrentModification { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "CONCURRENT_MODIFICATION",
                    error.to_string(),
                    "Re-read the record and retry with the fresh version",
                ),
            },
            EngineError::NotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", error.to_string()),
            },
            EngineError::DuplicateRecord { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("DUPLICATE_RECORD", error.to_string()),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        error.to_string(),
                    ),
                }
            }
        }
    }
}

/// Response body of `POST /payroll/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReport {
    /// The period records were generated for.
    pub period: PayPeriod,
    /// Newly-created draft records.
    pub created: Vec<PayrollRecord>,
    /// Active employees that already had a record for the period.
    pub skipped_employee_ids: Vec<String>,
    /// Active employees whose directory snapshot failed validation.
    pub failed_employee_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let error = EngineError::InvalidInput {
            field: "basic_salary".to_string(),
            message: "must not be negative".to_string(),
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_INPUT");
    }

    #[test]
    fn test_illegal_transition_maps_to_409() {
        use crate::models::{PayStatus, PayrollAction};
        let error = EngineError::IllegalTransition {
            status: PayStatus::Submitted,
            action: PayrollAction::MarkPaid,
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "ILLEGAL_TRANSITION");
    }

    #[test]
    fn test_concurrent_modification_maps_to_409() {
        let error = EngineError::ConcurrentModification {
            record_id: Uuid::nil(),
            expected: 1,
            actual: 2,
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "CONCURRENT_MODIFICATION");
        assert!(response.error.details.is_some());
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let error = EngineError::NotFound {
            record_id: Uuid::nil(),
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "NOT_FOUND");
    }

    #[test]
    fn test_config_error_maps_to_500() {
        let error = EngineError::ConfigNotFound {
            path: "/missing".to_string(),
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "CONFIG_ERROR");
    }
}
