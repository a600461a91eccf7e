//! Attendance aggregation.
//!
//! Reduces an employee's raw attendance rows for one period into one total
//! per exception type.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{AggregatedException, AttendanceRecord, PayPeriod};

/// Sums attendance exception counts per exception type.
///
/// Only rows belonging to `employee_id` and dated inside `period` (first to
/// last day, inclusive) are counted. The result is ordered by exception type
/// id so that downstream deduction lines are deterministic. An employee with
/// no matching rows yields an empty list.
///
/// Negative totals are passed through unchanged; the deduction evaluator
/// rejects them.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_attendance;
/// use payroll_engine::models::{AttendanceRecord, PayPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::new(2026, 1).unwrap();
/// let records = vec![
///     AttendanceRecord {
///         employee_id: "emp_001".to_string(),
///         record_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///         exception_type_id: "late".to_string(),
///         exception_count: Decimal::ONE,
///     },
///     AttendanceRecord {
///         employee_id: "emp_001".to_string(),
///         record_date: NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
///         exception_type_id: "late".to_string(),
///         exception_count: Decimal::ONE,
///     },
/// ];
///
/// let totals = aggregate_attendance("emp_001", &period, &records);
/// assert_eq!(totals.len(), 1);
/// assert_eq!(totals[0].total_count, Decimal::new(2, 0));
/// ```
pub fn aggregate_attendance(
    employee_id: &str,
    period: &PayPeriod,
    records: &[AttendanceRecord],
) -> Vec<AggregatedException> {
    records
        .iter()
        .filter(|r| r.employee_id == employee_id && period.contains_date(r.record_date))
        .fold(BTreeMap::<&str, Decimal>::new(), |mut totals, r| {
            *totals.entry(r.exception_type_id.as_str()).or_default() += r.exception_count;
            totals
        })
        .into_iter()
        .map(|(exception_type_id, total_count)| AggregatedException {
            exception_type_id: exception_type_id.to_string(),
            total_count,
        })
        .collect()
}
