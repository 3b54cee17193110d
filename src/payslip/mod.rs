//! Payslip rendering.
//!
//! Formats one record and its breakdown into a fixed-layout, human-readable
//! plain-text document. Rendering is pure and works at any status; it does
//! not require the record to be settled.

use rust_decimal::Decimal;

use crate::models::PayrollRecord;

const WIDTH: usize = 46;

/// Renders a payslip document for one record.
///
/// The layout is fixed: identity and period, every monetary input
/// (including each named allowance and deduction), the derived breakdown,
/// attendance, and the current status with any workflow comments.
pub fn render(record: &PayrollRecord, employee_name: &str, currency: &str) -> String {
    let mut out = String::new();
    let rule = "=".repeat(WIDTH);
    let thin = "-".repeat(WIDTH);

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&center("PAYSLIP"));
    out.push_str(&rule);
    out.push('\n');

    push_kv(&mut out, "Employee", employee_name);
    push_kv(&mut out, "Employee ID", &record.employee_id);
    push_kv(&mut out, "Pay period", &record.period.to_string());
    push_kv(&mut out, "Status", &record.status.to_string());
    if let Some(method) = record.payment_method {
        push_kv(&mut out, "Payment method", &method.to_string());
    }

    out.push_str(&thin);
    out.push('\n');
    out.push_str("EARNINGS\n");
    push_amount(&mut out, "Basic salary", record.basic_salary, currency);
    for (name, amount) in &record.allowances {
        push_amount(&mut out, &format!("Allowance: {name}"), *amount, currency);
    }
    push_amount(&mut out, "Overtime pay", record.overtime_pay, currency);
    push_amount(&mut out, "Bonus", record.bonus, currency);
    push_amount(&mut out, "Gross pay", record.breakdown.gross_pay, currency);

    out.push_str(&thin);
    out.push('\n');
    out.push_str("DEDUCTIONS\n");
    push_amount(&mut out, "Tax", record.breakdown.tax_amount, currency);
    push_amount(
        &mut out,
        "Social security",
        record.breakdown.social_security,
        currency,
    );
    push_amount(
        &mut out,
        "Health insurance",
        record.breakdown.health_insurance,
        currency,
    );
    for (name, amount) in &record.deductions {
        push_amount(&mut out, &format!("Other: {name}"), *amount, currency);
    }

    out.push_str(&thin);
    out.push('\n');
    push_amount(&mut out, "NET PAY", record.breakdown.net_pay, currency);

    out.push_str(&thin);
    out.push('\n');
    push_kv(
        &mut out,
        "Attendance",
        &format!(
            "{} worked / {} absent / {} leave",
            record.working_days, record.absent_days, record.leave_days
        ),
    );
    if let Some(comment) = &record.approval_comment {
        push_kv(&mut out, "Approval note", comment);
    }
    if let Some(comment) = &record.rejection_comment {
        push_kv(&mut out, "Rejection note", comment);
    }
    push_kv(&mut out, "Revision", &record.version.to_string());

    out.push_str(&rule);
    out.push('\n');
    out
}

fn center(text: &str) -> String {
    let pad = WIDTH.saturating_sub(text.len()) / 2;
    format!("{}{}\n", " ".repeat(pad), text)
}

fn push_kv(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{label:<18}{value}\n"));
}

fn push_amount(out: &mut String, label: &str, amount: Decimal, currency: &str) {
    let value = format!("{amount} {currency}");
    let pad = WIDTH.saturating_sub(label.len() + value.len());
    out.push_str(&format!("{label}{}{value}\n", " ".repeat(pad)));
}
