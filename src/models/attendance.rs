//! Attendance models.
//!
//! This module defines the attendance exception catalog
//! ([`AttendanceExceptionType`] with its deduction rule), the raw
//! [`AttendanceRecord`] rows imported per employee and day, and the derived
//! [`AggregatedException`] totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The kind of deduction rule attached to an exception type.
///
/// The unit of the aggregated count depends on the rule: hours for
/// `PerHour`, days for `PerDaySalary`, occurrences otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionRuleType {
    /// A flat penalty charged once if the exception occurred at all.
    Fixed,
    /// `value` per hour.
    PerHour,
    /// `value` (a fraction of a day's pay) per day.
    PerDaySalary,
    /// `value` per occurrence beyond a free threshold.
    TieredCount,
}

impl DeductionRuleType {
    /// Snake-case name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeductionRuleType::Fixed => "fixed",
            DeductionRuleType::PerHour => "per_hour",
            DeductionRuleType::PerDaySalary => "per_day_salary",
            DeductionRuleType::TieredCount => "tiered_count",
        }
    }
}

/// A category of attendance infraction with its deduction rule.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AttendanceExceptionType, DeductionRuleType};
/// use rust_decimal::Decimal;
///
/// let late = AttendanceExceptionType {
///     id: "late".to_string(),
///     name: "Late arrival".to_string(),
///     deduction_rule_type: DeductionRuleType::TieredCount,
///     deduction_rule_value: Decimal::new(50, 0),
///     deduction_rule_threshold: Some(Decimal::new(3, 0)),
/// };
/// assert!(late.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceExceptionType {
    /// Unique identifier.
    pub id: String,
    /// Display name (e.g. "Late arrival").
    pub name: String,
    /// Which rule computes the deduction.
    pub deduction_rule_type: DeductionRuleType,
    /// Rule value: amount, hourly rate, day fraction or per-occurrence amount.
    #[serde(default)]
    pub deduction_rule_value: Decimal,
    /// Free occurrences for `tiered_count` rules.
    #[serde(default)]
    pub deduction_rule_threshold: Option<Decimal>,
}

impl AttendanceExceptionType {
    /// Checks the rule value and threshold against the rule type's invariant.
    ///
    /// - every rule needs a non-negative value
    /// - `per_day_salary` needs a value in `[0, 1]`
    /// - `tiered_count` needs a non-negative integer threshold
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidDeductionRule {
            exception_type_id: self.id.clone(),
            message,
        };
        let value = self.deduction_rule_value;

        if value.is_sign_negative() && !value.is_zero() {
            return Err(invalid(format!(
                "deduction value {} must not be negative",
                value
            )));
        }

        match self.deduction_rule_type {
            DeductionRuleType::Fixed | DeductionRuleType::PerHour => Ok(()),
            DeductionRuleType::PerDaySalary => {
                if value > Decimal::ONE {
                    Err(invalid(format!(
                        "day fraction {} must be between 0 and 1",
                        value
                    )))
                } else {
                    Ok(())
                }
            }
            DeductionRuleType::TieredCount => match self.deduction_rule_threshold {
                None => Err(invalid("tiered_count rule requires a threshold".to_string())),
                Some(threshold) if threshold < Decimal::ZERO || !threshold.fract().is_zero() => {
                    Err(invalid(format!(
                        "threshold {} must be a non-negative integer",
                        threshold
                    )))
                }
                Some(_) => Ok(()),
            },
        }
    }
}

/// One imported attendance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the row belongs to.
    pub employee_id: String,
    /// The day the exception occurred.
    pub record_date: NaiveDate,
    /// The exception type.
    pub exception_type_id: String,
    /// Magnitude in the unit implied by the exception type's rule.
    pub exception_count: Decimal,
}

/// The per-period total for one employee and one exception type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedException {
    /// The exception type.
    pub exception_type_id: String,
    /// Sum of `exception_count` over the period.
    pub total_count: Decimal,
}
