//! Performance benchmarks for the payroll engine.
//!
//! Covers a single payslip, sequential batches of 100 and 1000 employees,
//! and the concurrent runner at 1000 employees.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::config::EngineSettings;
use payroll_engine::engine::PayrollEngine;
use payroll_engine::models::{
    AttendanceExceptionType, AttendanceRecord, ComputeMode, DeductionRuleType, Employee,
    PayPeriod, SalaryGroup, SalaryItem,
};
use payroll_engine::store::InMemoryStore;

fn item(id: &str, mode: ComputeMode, value: Decimal, formula: Option<&str>) -> SalaryItem {
    SalaryItem {
        id: id.to_string(),
        name: id.to_string(),
        compute_mode: mode,
        value,
        formula: formula.map(str::to_string),
        order: 0,
    }
}

/// Builds a company with `employee_count` employees spread over four
/// departments, each with a few attendance exceptions.
fn create_store(employee_count: usize) -> InMemoryStore {
    let mut store = InMemoryStore::new();

    store.insert_salary_item(item("meal", ComputeMode::Fixed, Decimal::new(300, 0), None));
    store.insert_salary_item(item("transport", ComputeMode::Fixed, Decimal::new(200, 0), None));
    store.insert_salary_item(item(
        "performance",
        ComputeMode::PercentageOfBase,
        Decimal::new(10, 2),
        None,
    ));
    store.insert_salary_item(item(
        "seniority",
        ComputeMode::Formula,
        Decimal::ZERO,
        Some("(meal + transport) * 2"),
    ));
    store.insert_salary_group(SalaryGroup {
        id: "grp_standard".to_string(),
        name: "Standard".to_string(),
        items: ["meal", "transport", "seniority", "performance"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    });
    for dept in 0..4 {
        store.assign_to_department(format!("dept_{}", dept), "grp_standard");
    }

    store.insert_exception_type(AttendanceExceptionType {
        id: "late".to_string(),
        name: "Late arrival".to_string(),
        deduction_rule_type: DeductionRuleType::TieredCount,
        deduction_rule_value: Decimal::new(50, 0),
        deduction_rule_threshold: Some(Decimal::new(3, 0)),
    });
    store.insert_exception_type(AttendanceExceptionType {
        id: "absence".to_string(),
        name: "Absence".to_string(),
        deduction_rule_type: DeductionRuleType::PerDaySalary,
        deduction_rule_value: Decimal::ONE,
        deduction_rule_threshold: None,
    });

    for i in 0..employee_count {
        let id = format!("emp_{:05}", i);
        store.insert_employee(Employee {
            id: id.clone(),
            name: id.clone(),
            department_id: Some(format!("dept_{}", i % 4)),
            position_id: None,
            base_salary: Decimal::new(8000 + (i as i64 % 50) * 100, 0),
            active: true,
        });
        for day in [3, 8, 13, 17, 24] {
            store.insert_attendance_record(AttendanceRecord {
                employee_id: id.clone(),
                record_date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
                exception_type_id: (if day == 24 { "absence" } else { "late" }).to_string(),
                exception_count: Decimal::ONE,
            });
        }
    }

    store
}

fn create_engine(employee_count: usize) -> PayrollEngine {
    PayrollEngine::new(Arc::new(create_store(employee_count)), EngineSettings::default())
        .expect("default settings are valid")
}

fn period() -> PayPeriod {
    PayPeriod::new(2026, 1).expect("valid period")
}

fn bench_single_payslip(c: &mut Criterion) {
    let engine = create_engine(1);

    c.bench_function("single_payslip", |b| {
        b.iter(|| {
            let payslip = engine
                .calculate_employee_salary(black_box("emp_00000"), period())
                .unwrap();
            black_box(payslip)
        })
    });
}

fn bench_batch_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_sequential");

    for employee_count in [100usize, 1000] {
        let engine = create_engine(employee_count);
        group.throughput(Throughput::Elements(employee_count as u64));
        if employee_count >= 1000 {
            group.sample_size(10);
        }
        group.bench_with_input(
            BenchmarkId::from_parameter(employee_count),
            &employee_count,
            |b, _| {
                b.iter(|| {
                    let result = engine.batch_calculate_salary(period(), None).unwrap();
                    black_box(result)
                })
            },
        );
    }

    group.finish();
}

fn bench_batch_concurrent(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let engine = create_engine(1000);

    let mut group = c.benchmark_group("batch_concurrent");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let result = engine
                .batch_calculate_salary_concurrent(period(), None, None)
                .await
                .unwrap();
            black_box(result)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_payslip,
    bench_batch_sequential,
    bench_batch_concurrent
);
criterion_main!(benches);
