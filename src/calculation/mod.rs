//! Payroll breakdown calculation.
//!
//! The calculation engine is a pure function: raw monetary inputs and
//! attendance counters go in, a rounded [`PayBreakdown`] comes out. It
//! performs no I/O and holds no state, so it is safe to call repeatedly
//! and in parallel for different records.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::PayrollRates;
use crate::error::{EngineError, EngineResult};
use crate::models::{PayBreakdown, PayrollRecord};

/// The raw inputs to one breakdown calculation.
///
/// Borrowed views over a record's monetary and attendance fields plus the
/// calendar length of its period.
#[derive(Debug, Clone, Copy)]
pub struct CalculationInputs<'a> {
    /// Base salary for the period.
    pub basic_salary: Decimal,
    /// Overtime pay for the period.
    pub overtime_pay: Decimal,
    /// One-off bonus for the period.
    pub bonus: Decimal,
    /// Named allowance components.
    pub allowances: &'a std::collections::BTreeMap<String, Decimal>,
    /// Named deduction components; validated here, settled outside gross.
    pub deductions: &'a std::collections::BTreeMap<String, Decimal>,
    /// Days worked.
    pub working_days: u32,
    /// Unexcused absent days.
    pub absent_days: u32,
    /// Approved leave days.
    pub leave_days: u32,
    /// Calendar length of the pay period in days.
    pub period_days: u32,
}

impl<'a> CalculationInputs<'a> {
    /// Borrows the calculation inputs from a payroll record.
    pub fn from_record(record: &'a PayrollRecord) -> Self {
        Self {
            basic_salary: record.basic_salary,
            overtime_pay: record.overtime_pay,
            bonus: record.bonus,
            allowances: &record.allowances,
            deductions: &record.deductions,
            working_days: record.working_days,
            absent_days: record.absent_days,
            leave_days: record.leave_days,
            period_days: record.period.day_count(),
        }
    }
}

/// Rounds to the nearest whole currency unit, half away from zero.
fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the derived monetary breakdown for one record.
///
/// Each derived component is rounded independently to the nearest currency
/// unit; net pay is computed from the already-rounded components so the
/// totals reconcile exactly:
/// `net = gross - tax - social_security - health_insurance`.
///
/// # Errors
///
/// Returns `InvalidInput` when any monetary input is negative or when the
/// attendance counters exceed the period's calendar length.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use payroll_engine::calculation::{calculate, CalculationInputs};
/// use payroll_engine::config::PayrollRates;
/// use rust_decimal::Decimal;
///
/// let mut allowances = BTreeMap::new();
/// allowances.insert("transport".to_string(), Decimal::from(50_000));
/// let deductions = BTreeMap::new();
///
/// let inputs = CalculationInputs {
///     basic_salary: Decimal::from(300_000),
///     overtime_pay: Decimal::from(20_000),
///     bonus: Decimal::from(10_000),
///     allowances: &allowances,
///     deductions: &deductions,
///     working_days: 22,
///     absent_days: 0,
///     leave_days: 0,
///     period_days: 31,
/// };
///
/// let breakdown = calculate(&inputs, &PayrollRates::default()).unwrap();
/// assert_eq!(breakdown.gross_pay, Decimal::from(380_000));
/// assert_eq!(breakdown.net_pay, Decimal::from(292_600));
/// ```
pub fn calculate(inputs: &CalculationInputs<'_>, rates: &PayrollRates) -> EngineResult<PayBreakdown> {
    validate(inputs)?;

    let allowance_total: Decimal = inputs.allowances.values().copied().sum();
    let gross_pay =
        round_currency(inputs.basic_salary + inputs.overtime_pay + inputs.bonus + allowance_total);

    let tax_amount = round_currency(gross_pay * rates.tax_rate);
    let social_security = round_currency(gross_pay * rates.ss_rate);
    let health_insurance = round_currency(gross_pay * rates.hi_rate);
    let net_pay = gross_pay - tax_amount - social_security - health_insurance;

    Ok(PayBreakdown {
        gross_pay,
        tax_amount,
        social_security,
        health_insurance,
        net_pay,
    })
}

/// Recomputes a record's breakdown in place.
///
/// The caller is responsible for ensuring the record is still editable;
/// this helper only validates inputs and writes the derived fields.
pub fn recalculate_record(record: &mut PayrollRecord, rates: &PayrollRates) -> EngineResult<()> {
    let breakdown = calculate(&CalculationInputs::from_record(record), rates)?;
    record.breakdown = breakdown;
    Ok(())
}

fn validate(inputs: &CalculationInputs<'_>) -> EngineResult<()> {
    let monetary = [
        ("basic_salary", inputs.basic_salary),
        ("overtime_pay", inputs.overtime_pay),
        ("bonus", inputs.bonus),
    ];
    for (field, value) in monetary {
        if value < Decimal::ZERO {
            return Err(negative(field, value));
        }
    }
    for (name, value) in inputs.allowances {
        if *value < Decimal::ZERO {
            return Err(negative(&format!("allowances.{name}"), *value));
        }
    }
    for (name, value) in inputs.deductions {
        if *value < Decimal::ZERO {
            return Err(negative(&format!("deductions.{name}"), *value));
        }
    }

    // Widened so extreme counters cannot overflow before the comparison.
    let attendance =
        u64::from(inputs.working_days) + u64::from(inputs.absent_days) + u64::from(inputs.leave_days);
    if attendance > u64::from(inputs.period_days) {
        return Err(EngineError::InvalidInput {
            field: "attendance".to_string(),
            message: format!(
                "working + absent + leave days ({attendance}) exceed the period's {} calendar days",
                inputs.period_days
            ),
        });
    }
    Ok(())
}

fn negative(field: &str, value: Decimal) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: format!("must not be negative, got {value}"),
    }
}
