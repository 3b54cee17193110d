//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite covers the hot paths:
//! - Single breakdown calculation
//! - Bulk submit fan-out over batches of records
//! - CSV export of a full period
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use uuid::Uuid;

use payroll_engine::bulk::apply_bulk;
use payroll_engine::calculation::{calculate, recalculate_record, CalculationInputs};
use payroll_engine::config::PayrollRates;
use payroll_engine::flatfile;
use payroll_engine::models::{InMemoryAuditLog, PayPeriod, PayrollAction, PayrollRecord};
use payroll_engine::store::{InMemoryRecordStore, RecordFilter, RecordStore};
use payroll_engine::workflow::{Actor, ActorRole};
use chrono::Utc;

fn sample_allowances() -> BTreeMap<String, Decimal> {
    let mut allowances = BTreeMap::new();
    allowances.insert("transport".to_string(), Decimal::from(50_000));
    allowances.insert("housing".to_string(), Decimal::from(80_000));
    allowances
}

fn bench_calculation(c: &mut Criterion) {
    let allowances = sample_allowances();
    let deductions = BTreeMap::new();
    let rates = PayrollRates::default();
    let inputs = CalculationInputs {
        basic_salary: Decimal::from(300_000),
        overtime_pay: Decimal::from(20_000),
        bonus: Decimal::from(10_000),
        allowances: &allowances,
        deductions: &deductions,
        working_days: 22,
        absent_days: 0,
        leave_days: 0,
        period_days: 31,
    };

    c.bench_function("single_breakdown_calculation", |b| {
        b.iter(|| calculate(black_box(&inputs), black_box(&rates)))
    });
}

fn seeded_store(count: usize) -> (InMemoryRecordStore, Vec<Uuid>) {
    let store = InMemoryRecordStore::new();
    let period = PayPeriod::month(2026, 1).expect("valid month");
    let rates = PayrollRates::default();
    let ids = (0..count)
        .map(|i| {
            let mut record =
                PayrollRecord::new_draft(format!("emp_{i:05}"), period, Utc::now());
            record.basic_salary = Decimal::from(300_000);
            record.allowances = sample_allowances();
            record.working_days = 22;
            recalculate_record(&mut record, &rates).expect("valid inputs");
            let id = record.id;
            store.insert(record).expect("unique employee/period");
            id
        })
        .collect();
    (store, ids)
}

fn bench_bulk_submit(c: &mut Criterion) {
    let actor = Actor {
        id: "hr_bench".to_string(),
        role: ActorRole::Preparer,
    };

    let mut group = c.benchmark_group("bulk_submit");
    for count in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || seeded_store(count),
                |(store, ids)| {
                    let audit = InMemoryAuditLog::new();
                    apply_bulk(
                        &store,
                        &audit,
                        &ids,
                        PayrollAction::Submit,
                        &actor,
                        None,
                    )
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let (store, _) = seeded_store(500);
    let records = store.list(&RecordFilter::default());

    c.bench_function("csv_export_500_records", |b| {
        b.iter(|| flatfile::export(black_box(&records)))
    });
}

criterion_group!(benches, bench_calculation, bench_bulk_submit, bench_export);
criterion_main!(benches);
