//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::bulk::apply_bulk;
use crate::calculation::recalculate_record;
use crate::error::EngineError;
use crate::flatfile;
use crate::models::{PayrollAction, PayrollRecord};
use crate::payslip;
use crate::store::RecordFilter;
use crate::workflow::apply_transition;

use super::request::{BulkRequest, GenerateRequest, ListQuery, TransitionRequest};
use super::response::{ApiError, ApiErrorResponse, GenerateReport};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", get(list_handler))
        .route("/payroll/generate", post(generate_handler))
        .route("/payroll/bulk", post(bulk_handler))
        .route("/payroll/export", get(export_handler))
        .route("/payroll/import", post(import_handler))
        .route("/payroll/:id/submit", post(submit_handler))
        .route("/payroll/:id/approve", post(approve_handler))
        .route("/payroll/:id/reject", post(reject_handler))
        .route("/payroll/:id/resubmit", post(resubmit_handler))
        .route("/payroll/:id/mark-paid", post(mark_paid_handler))
        .route("/payroll/:id/payslip", get(payslip_handler))
        .with_state(state)
}

/// Unwraps a JSON body, converting rejections into API errors.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            })
        }
    }
}

/// Resolves query parameters into a store filter, mapping department and
/// employee-name criteria to an employee-id set through the directory.
fn resolve_filter(state: &AppState, query: &ListQuery) -> RecordFilter {
    let employee_ids = if query.department.is_some() || query.employee_name.is_some() {
        let wanted_name = query.employee_name.as_deref().map(str::to_lowercase);
        let ids: HashSet<String> = state
            .directory()
            .all()
            .into_iter()
            .filter(|e| {
                query
                    .department
                    .as_deref()
                    .is_none_or(|d| e.department.eq_ignore_ascii_case(d))
            })
            .filter(|e| {
                wanted_name
                    .as_deref()
                    .is_none_or(|n| e.name.to_lowercase().contains(n))
            })
            .map(|e| e.id)
            .collect();
        Some(ids)
    } else {
        None
    };

    RecordFilter {
        period: query.period,
        status: query.status,
        payment_method: query.payment_method,
        employee_ids,
    }
}

/// Handler for `GET /payroll`.
async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<PayrollRecord>> {
    let filter = resolve_filter(&state, &query);
    let records = state.store().list(&filter);
    Json(records)
}

/// Handler for `POST /payroll/generate`.
///
/// Materializes a draft record for every active employee that does not yet
/// have one for the period, seeding inputs from the directory snapshot.
async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };
    let period = request.period;
    info!(correlation_id = %correlation_id, period = %period, "Generating draft records");

    let now = Utc::now();
    let mut created = Vec::new();
    let mut skipped = Vec::new();
    let mut failed = Vec::new();

    for employee in state.directory().active() {
        if state
            .store()
            .find_by_employee_period(&employee.id, period)
            .is_some()
        {
            skipped.push(employee.id);
            continue;
        }

        let mut record = PayrollRecord::new_draft(employee.id.clone(), period, now);
        record.basic_salary = employee.basic_salary;
        record.allowances = employee.allowances.clone();
        record.deductions = employee.deductions.clone();
        record.payment_method = employee.payment_method;
        record.working_days = period.day_count();

        // One employee's bad snapshot never aborts the rest of the batch.
        if let Err(error) = recalculate_record(&mut record, state.rates()) {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                error = %error,
                "Draft generation failed for employee"
            );
            failed.push(employee.id);
            continue;
        }
        match state.store().insert(record.clone()) {
            Ok(()) => created.push(record),
            // A concurrent generate won the (employee, period) slot.
            Err(EngineError::DuplicateRecord { .. }) => skipped.push(employee.id),
            Err(error) => {
                warn!(
                    correlation_id = %correlation_id,
                    employee_id = %employee.id,
                    error = %error,
                    "Draft generation failed for employee"
                );
                failed.push(employee.id);
            }
        }
    }

    info!(
        correlation_id = %correlation_id,
        period = %period,
        created = created.len(),
        skipped = skipped.len(),
        failed = failed.len(),
        "Draft generation completed"
    );

    Json(GenerateReport {
        period,
        created,
        skipped_employee_ids: skipped,
        failed_employee_ids: failed,
    })
    .into_response()
}

/// Applies one workflow transition to one record with optimistic locking.
fn transition_record(
    state: &AppState,
    id: Uuid,
    action: PayrollAction,
    request: &TransitionRequest,
) -> Result<PayrollRecord, ApiErrorResponse> {
    let record = state.store().get(id)?;
    // The optimistic token: the caller's version when supplied, otherwise
    // the version just read.
    let expected_version = request.version.unwrap_or(record.version);
    if expected_version != record.version {
        return Err(EngineError::ConcurrentModification {
            record_id: id,
            expected: expected_version,
            actual: record.version,
        }
        .into());
    }

    let mut updated = record;
    let entry = apply_transition(
        &mut updated,
        action,
        &request.actor,
        request.comment.as_deref(),
        Utc::now(),
    )?;
    let committed = state.store().update(expected_version, updated)?;
    state.audit().append(entry);
    Ok(committed)
}

/// Shared implementation of the four single-record transition endpoints.
async fn handle_transition(
    state: AppState,
    id: Uuid,
    action: PayrollAction,
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    match transition_record(&state, id, action, &request) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %id,
                action = %action,
                actor = %request.actor.id,
                status = %record.status,
                version = record.version,
                "Transition applied"
            );
            Json(record).into_response()
        }
        Err(error) => {
            warn!(
                correlation_id = %correlation_id,
                record_id = %id,
                action = %action,
                code = %error.error.code,
                "Transition rejected"
            );
            error.into_response()
        }
    }
}

/// Handler for `POST /payroll/{id}/submit`.
async fn submit_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Response {
    handle_transition(state, id, PayrollAction::Submit, payload).await
}

/// Handler for `POST /payroll/{id}/approve`.
async fn approve_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Response {
    handle_transition(state, id, PayrollAction::Approve, payload).await
}

/// Handler for `POST /payroll/{id}/reject`.
async fn reject_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Response {
    handle_transition(state, id, PayrollAction::Reject, payload).await
}

/// Handler for `POST /payroll/{id}/resubmit`.
async fn resubmit_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Response {
    handle_transition(state, id, PayrollAction::Resubmit, payload).await
}

/// Handler for `POST /payroll/{id}/mark-paid`.
async fn mark_paid_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Response {
    handle_transition(state, id, PayrollAction::MarkPaid, payload).await
}

/// Handler for `POST /payroll/bulk`.
async fn bulk_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };
    info!(
        correlation_id = %correlation_id,
        action = %request.action,
        count = request.ids.len(),
        actor = %request.actor.id,
        "Processing bulk operation"
    );

    // The rayon fan-out is synchronous; keep it off the async runtime.
    let report = tokio::task::spawn_blocking(move || {
        apply_bulk(
            state.store(),
            state.audit(),
            &request.ids,
            request.action,
            &request.actor,
            request.comment.as_deref(),
        )
    })
    .await;

    match report {
        Ok(report) => Json(report).into_response(),
        Err(error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %error,
                "Bulk operation task failed"
            );
            ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("INTERNAL_ERROR", "Bulk operation did not complete"),
            }
            .into_response()
        }
    }
}

/// Handler for `GET /payroll/export`.
async fn export_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let filter = resolve_filter(&state, &query);
    let records = state.store().list(&filter);

    match flatfile::export(&records) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"payroll_export.csv\"",
                ),
            ],
            body,
        )
            .into_response(),
        Err(error) => {
            let response: ApiErrorResponse = error.into();
            response.into_response()
        }
    }
}

/// Handler for `POST /payroll/import`.
async fn import_handler(State(state): State<AppState>, body: String) -> Response {
    let correlation_id = Uuid::new_v4();
    let report = flatfile::import(
        body.as_bytes(),
        state.store(),
        state.directory(),
        state.rates(),
        Utc::now(),
    );
    info!(
        correlation_id = %correlation_id,
        applied = report.applied,
        failed = report.failed,
        "Bulk upload processed"
    );
    Json(report).into_response()
}

/// Handler for `GET /payroll/{id}/payslip`.
async fn payslip_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let record = match state.store().get(id) {
        Ok(record) => record,
        Err(error) => {
            let response: ApiErrorResponse = error.into();
            return response.into_response();
        }
    };

    let employee_name = state
        .directory()
        .get(&record.employee_id)
        .map(|e| e.name)
        .unwrap_or_else(|| record.employee_id.clone());

    let document = payslip::render(&record, &employee_name, &state.rates().currency);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        document,
    )
        .into_response()
}
