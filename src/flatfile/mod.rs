//! CSV import/export adapter.
//!
//! The flat representation carries the record's raw inputs in a fixed,
//! documented column order so spreadsheet tools can round-trip it:
//!
//! `employee_id, period, basic_salary, allowances, deductions,
//! overtime_pay, bonus, working_days, absent_days, leave_days,
//! payment_method, status`
//!
//! Allowance and deduction maps are JSON-encoded into their single column.
//! Derived monetary fields are never exported; re-importing a file
//! recomputes them, and because the calculation is deterministic the
//! round trip reproduces them exactly.

use std::collections::BTreeMap;
use std::io::Read;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::calculation::recalculate_record;
use crate::config::PayrollRates;
use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, PayStatus, PaymentMethod, PayrollRecord};
use crate::store::{EmployeeDirectory, RecordStore};
use crate::workflow::ensure_editable;

/// One row of the flat representation. Field order is the column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRow {
    /// External employee identifier.
    pub employee_id: String,
    /// Pay period in canonical string form; legacy `YYYY-MM` buckets are
    /// accepted on import.
    pub period: PayPeriod,
    /// Base salary.
    pub basic_salary: Decimal,
    /// JSON-encoded allowance map.
    pub allowances: String,
    /// JSON-encoded deduction map.
    pub deductions: String,
    /// Overtime pay.
    pub overtime_pay: Decimal,
    /// Bonus.
    pub bonus: Decimal,
    /// Days worked.
    pub working_days: u32,
    /// Absent days.
    pub absent_days: u32,
    /// Leave days.
    pub leave_days: u32,
    /// Payment method; empty when unset.
    pub payment_method: Option<PaymentMethod>,
    /// Lifecycle status at export time; informational on import.
    pub status: PayStatus,
}

impl CsvRow {
    /// Builds a row from a record.
    ///
    /// Only fails if a component map cannot be JSON-encoded, which cannot
    /// happen for string-keyed decimal maps.
    pub fn from_record(record: &PayrollRecord) -> EngineResult<Self> {
        Ok(Self {
            employee_id: record.employee_id.clone(),
            period: record.period,
            basic_salary: record.basic_salary,
            allowances: encode_components("allowances", &record.allowances)?,
            deductions: encode_components("deductions", &record.deductions)?,
            overtime_pay: record.overtime_pay,
            bonus: record.bonus,
            working_days: record.working_days,
            absent_days: record.absent_days,
            leave_days: record.leave_days,
            payment_method: record.payment_method,
            status: record.status,
        })
    }
}

fn encode_components(
    field: &str,
    components: &BTreeMap<String, Decimal>,
) -> EngineResult<String> {
    serde_json::to_string(components).map_err(|e| EngineError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn decode_components(field: &str, text: &str) -> EngineResult<BTreeMap<String, Decimal>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(text).map_err(|e| EngineError::InvalidInput {
        field: field.to_string(),
        message: format!("not a valid JSON component map: {e}"),
    })
}

/// Serializes records into the flat representation.
///
/// Rows come out in the order given, which for store listings is sorted by
/// employee id and period.
pub fn export(records: &[PayrollRecord]) -> EngineResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        let row = CsvRow::from_record(record)?;
        writer.serialize(row).map_err(csv_error)?;
    }
    let bytes = writer.into_inner().map_err(|e| EngineError::InvalidInput {
        field: "export".to_string(),
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| EngineError::InvalidInput {
        field: "export".to_string(),
        message: e.to_string(),
    })
}

fn csv_error(e: csv::Error) -> EngineError {
    EngineError::InvalidInput {
        field: "csv".to_string(),
        message: e.to_string(),
    }
}

/// What happened to one imported row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RowOutcome {
    /// A new draft record was created.
    Created {
        /// The new record's id.
        record_id: Uuid,
    },
    /// An existing editable record was updated and recomputed.
    Updated {
        /// The updated record's id.
        record_id: Uuid,
    },
    /// The row was skipped; sibling rows are unaffected.
    Error {
        /// Why the row was skipped.
        reason: String,
    },
}

/// Per-row result of a bulk upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowResult {
    /// 1-based data row number (the header is row 0).
    pub row: usize,
    /// The employee id the row referred to, when parseable.
    pub employee_id: Option<String>,
    /// Outcome for this row.
    #[serde(flatten)]
    pub outcome: RowOutcome,
}

/// The full report of a bulk upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Rows that created or updated a record.
    pub applied: usize,
    /// Rows that were skipped.
    pub failed: usize,
    /// Per-row outcomes in file order.
    pub rows: Vec<RowResult>,
}

/// Parses and applies a bulk upload.
///
/// Every row is validated independently with the same guards as manual
/// creation; a malformed row is reported and skipped, never aborting the
/// file. New rows become `draft` records; rows matching an existing
/// editable record update its inputs and recompute the breakdown. Rows
/// for frozen records or unknown employees are row errors.
pub fn import<R: Read>(
    reader: R,
    store: &dyn RecordStore,
    directory: &dyn EmployeeDirectory,
    rates: &PayrollRates,
    now: DateTime<Utc>,
) -> ImportReport {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (index, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row_number = index + 1;
        let row_result = match result {
            Ok(row) => {
                let employee_id = Some(row.employee_id.clone());
                match apply_row(&row, store, directory, rates, now) {
                    Ok(outcome) => RowResult {
                        row: row_number,
                        employee_id,
                        outcome,
                    },
                    Err(error) => RowResult {
                        row: row_number,
                        employee_id,
                        outcome: RowOutcome::Error {
                            reason: error.to_string(),
                        },
                    },
                }
            }
            Err(error) => {
                warn!(row = row_number, error = %error, "Skipping malformed import row");
                RowResult {
                    row: row_number,
                    employee_id: None,
                    outcome: RowOutcome::Error {
                        reason: format!("malformed row: {error}"),
                    },
                }
            }
        };
        rows.push(row_result);
    }

    let applied = rows
        .iter()
        .filter(|r| !matches!(r.outcome, RowOutcome::Error { .. }))
        .count();
    let failed = rows.len() - applied;

    ImportReport {
        applied,
        failed,
        rows,
    }
}

fn apply_row(
    row: &CsvRow,
    store: &dyn RecordStore,
    directory: &dyn EmployeeDirectory,
    rates: &PayrollRates,
    now: DateTime<Utc>,
) -> EngineResult<RowOutcome> {
    if directory.get(&row.employee_id).is_none() {
        return Err(EngineError::InvalidInput {
            field: "employee_id".to_string(),
            message: format!("unknown employee '{}'", row.employee_id),
        });
    }

    let allowances = decode_components("allowances", &row.allowances)?;
    let deductions = decode_components("deductions", &row.deductions)?;

    match store.find_by_employee_period(&row.employee_id, row.period) {
        Some(existing) => {
            ensure_editable(&existing)?;
            let read_version = existing.version;
            let mut updated = existing;
            write_inputs(&mut updated, row, allowances, deductions);
            recalculate_record(&mut updated, rates)?;
            updated.version += 1;
            updated.updated_at = now;
            let committed = store.update(read_version, updated)?;
            Ok(RowOutcome::Updated {
                record_id: committed.id,
            })
        }
        None => {
            let mut record = PayrollRecord::new_draft(row.employee_id.clone(), row.period, now);
            write_inputs(&mut record, row, allowances, deductions);
            recalculate_record(&mut record, rates)?;
            let record_id = record.id;
            store.insert(record)?;
            Ok(RowOutcome::Created { record_id })
        }
    }
}

fn write_inputs(
    record: &mut PayrollRecord,
    row: &CsvRow,
    allowances: BTreeMap<String, Decimal>,
    deductions: BTreeMap<String, Decimal>,
) {
    record.basic_salary = row.basic_salary;
    record.allowances = allowances;
    record.deductions = deductions;
    record.overtime_pay = row.overtime_pay;
    record.bonus = row.bonus;
    record.working_days = row.working_days;
    record.absent_days = row.absent_days;
    record.leave_days = row.leave_days;
    record.payment_method = row.payment_method;
}
