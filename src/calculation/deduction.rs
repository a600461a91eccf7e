//! Attendance deduction evaluation.
//!
//! This module applies one exception type's deduction rule to the
//! aggregated count for a period, producing a non-negative monetary amount.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceExceptionType, AuditStep, DeductionRuleType};

/// The result of evaluating a deduction rule, including the audit step.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// The deduction amount (unrounded, never negative).
    pub amount: Decimal,
    /// The audit step recording this evaluation.
    pub audit_step: AuditStep,
}

/// Evaluates the deduction for one exception type.
///
/// | rule | amount |
/// |---|---|
/// | `fixed` | `value` if `count > 0`, else `0` |
/// | `per_hour` | `value * count` |
/// | `per_day_salary` | `value * daily_salary * count` |
/// | `tiered_count` | `value * max(0, count - threshold)` |
///
/// A negative `daily_salary` (possible when negative earnings items outweigh
/// positive ones) is treated as zero so the amount stays non-negative.
///
/// # Errors
///
/// - [`EngineError::InvalidDeductionRule`] if the rule violates its invariant
/// - [`EngineError::NegativeExceptionCount`] if `aggregated_count < 0`
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::evaluate_deduction;
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
///
/// let result = evaluate_deduction(&late, Decimal::new(5, 0), Decimal::ZERO, 1).unwrap();
/// assert_eq!(result.amount, Decimal::new(100, 0));
/// ```
pub fn evaluate_deduction(
    exception_type: &AttendanceExceptionType,
    aggregated_count: Decimal,
    daily_salary: Decimal,
    step_number: u32,
) -> EngineResult<DeductionResult> {
    exception_type.validate()?;

    if aggregated_count < Decimal::ZERO {
        return Err(EngineError::NegativeExceptionCount {
            exception_type_id: exception_type.id.clone(),
            count: aggregated_count,
        });
    }

    let value = exception_type.deduction_rule_value;
    let daily_salary = daily_salary.max(Decimal::ZERO);
    let overflow = || EngineError::CalculationError {
        message: format!(
            "deduction for exception type '{}' overflowed",
            exception_type.id
        ),
    };

    let (amount, reasoning) = match exception_type.deduction_rule_type {
        DeductionRuleType::Fixed => {
            if aggregated_count > Decimal::ZERO {
                (
                    value,
                    format!(
                        "Occurred {} time(s) - flat penalty ${}",
                        aggregated_count.normalize(),
                        value.normalize()
                    ),
                )
            } else {
                (Decimal::ZERO, "No occurrences - no penalty".to_string())
            }
        }
        DeductionRuleType::PerHour => {
            let amount = value.checked_mul(aggregated_count).ok_or_else(overflow)?;
            (
                amount,
                format!(
                    "{} hour(s) x ${} = ${}",
                    aggregated_count.normalize(),
                    value.normalize(),
                    amount.normalize()
                ),
            )
        }
        DeductionRuleType::PerDaySalary => {
            let amount = value
                .checked_mul(daily_salary)
                .and_then(|v| v.checked_mul(aggregated_count))
                .ok_or_else(overflow)?;
            (
                amount,
                format!(
                    "{} day(s) x {} of daily salary ${} = ${}",
                    aggregated_count.normalize(),
                    value.normalize(),
                    daily_salary.normalize(),
                    amount.normalize()
                ),
            )
        }
        DeductionRuleType::TieredCount => {
            let threshold = exception_type
                .deduction_rule_threshold
                .unwrap_or(Decimal::ZERO);
            let chargeable = (aggregated_count - threshold).max(Decimal::ZERO);
            let amount = value.checked_mul(chargeable).ok_or_else(overflow)?;
            (
                amount,
                format!(
                    "{} occurrence(s), {} free - {} charged at ${} = ${}",
                    aggregated_count.normalize(),
                    threshold.normalize(),
                    chargeable.normalize(),
                    value.normalize(),
                    amount.normalize()
                ),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: format!("deduction_{}", exception_type.deduction_rule_type.as_str()),
        rule_name: format!("Attendance Deduction: {}", exception_type.name),
        input: serde_json::json!({
            "exception_type_id": exception_type.id,
            "rule_type": exception_type.deduction_rule_type.as_str(),
            "rule_value": value.normalize().to_string(),
            "rule_threshold": exception_type
                .deduction_rule_threshold
                .map(|t| t.normalize().to_string()),
            "aggregated_count": aggregated_count.normalize().to_string(),
            "daily_salary": daily_salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string()
        }),
        reasoning,
    };

    Ok(DeductionResult { amount, audit_step })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn exception_type(
        rule: DeductionRuleType,
        value: &str,
        threshold: Option<&str>,
    ) -> AttendanceExceptionType {
        AttendanceExceptionType {
            id: "exc_001".to_string(),
            name: "Test exception".to_string(),
            deduction_rule_type: rule,
            deduction_rule_value: dec(value),
            deduction_rule_threshold: threshold.map(dec),
        }
    }

    #[test]
    fn test_tiered_count_charges_beyond_threshold() {
        let late = exception_type(DeductionRuleType::TieredCount, "50", Some("3"));
        let result = evaluate_deduction(&late, dec("5"), Decimal::ZERO, 1).unwrap();
        assert_eq!(result.amount, dec("100"));
    }

    #[test]
    fn test_tiered_count_below_threshold_is_free() {
        let late = exception_type(DeductionRuleType::TieredCount, "50", Some("3"));
        assert_eq!(
            evaluate_deduction(&late, dec("2"), Decimal::ZERO, 1).unwrap().amount,
            Decimal::ZERO
        );
        assert_eq!(
            evaluate_deduction(&late, dec("3"), Decimal::ZERO, 1).unwrap().amount,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_per_day_salary_half_day() {
        let absence = exception_type(DeductionRuleType::PerDaySalary, "0.5", None);
        let result = evaluate_deduction(&absence, dec("3"), dec("200"), 1).unwrap();
        assert_eq!(result.amount, dec("300"));
    }

    #[test]
    fn test_per_day_salary_negative_daily_salary_treated_as_zero() {
        let absence = exception_type(DeductionRuleType::PerDaySalary, "1", None);
        let result = evaluate_deduction(&absence, dec("2"), dec("-50"), 1).unwrap();
        assert_eq!(result.amount, Decimal::ZERO);
        assert_eq!(result.audit_step.input["daily_salary"], "0");
        assert!(result.audit_step.reasoning.contains("daily salary $0 "));
    }

    #[test]
    fn test_fixed_ignores_magnitude() {
        let early = exception_type(DeductionRuleType::Fixed, "30", None);
        assert_eq!(
            evaluate_deduction(&early, dec("7"), Decimal::ZERO, 1).unwrap().amount,
            dec("30")
        );
        assert_eq!(
            evaluate_deduction(&early, dec("0"), Decimal::ZERO, 1).unwrap().amount,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_per_hour_multiplies_hours() {
        let missing_hours = exception_type(DeductionRuleType::PerHour, "25.50", None);
        let result = evaluate_deduction(&missing_hours, dec("1.5"), Decimal::ZERO, 1).unwrap();
        assert_eq!(result.amount, dec("38.25"));
    }

    #[test]
    fn test_negative_count_rejected() {
        let late = exception_type(DeductionRuleType::PerHour, "10", None);
        match evaluate_deduction(&late, dec("-1"), Decimal::ZERO, 1) {
            Err(EngineError::NegativeExceptionCount {
                exception_type_id,
                count,
            }) => {
                assert_eq!(exception_type_id, "exc_001");
                assert_eq!(count, dec("-1"));
            }
            other => panic!("Expected NegativeExceptionCount, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_rule_rejected() {
        let absence = exception_type(DeductionRuleType::PerDaySalary, "1.2", None);
        let result = evaluate_deduction(&absence, dec("1"), dec("100"), 1);
        assert!(matches!(
            result,
            Err(EngineError::InvalidDeductionRule { .. })
        ));

        let late = exception_type(DeductionRuleType::TieredCount, "50", None);
        assert!(evaluate_deduction(&late, dec("5"), Decimal::ZERO, 1).is_err());
    }

    #[test]
    fn test_audit_step_records_inputs() {
        let late = exception_type(DeductionRuleType::TieredCount, "50", Some("3"));
        let result = evaluate_deduction(&late, dec("5"), dec("200"), 7).unwrap();

        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.rule_id, "deduction_tiered_count");
        assert_eq!(result.audit_step.input["rule_threshold"], "3");
        assert_eq!(result.audit_step.output["amount"], "100");
        assert!(result.audit_step.reasoning.contains("2 charged"));
    }

    fn rule_strategy() -> impl Strategy<Value = DeductionRuleType> {
        prop_oneof![
            Just(DeductionRuleType::Fixed),
            Just(DeductionRuleType::PerHour),
            Just(DeductionRuleType::PerDaySalary),
            Just(DeductionRuleType::TieredCount),
        ]
    }

    proptest! {
        #[test]
        fn prop_amount_never_negative(
            rule in rule_strategy(),
            value_cents in 0i64..100_000,
            fraction_pct in 0i64..=100,
            threshold in 0i64..20,
            count_tenths in 0i64..500,
            daily_cents in -50_000i64..500_000,
        ) {
            let value = match rule {
                DeductionRuleType::PerDaySalary => Decimal::new(fraction_pct, 2),
                _ => Decimal::new(value_cents, 2),
            };
            let exc = AttendanceExceptionType {
                id: "prop".to_string(),
                name: "Prop".to_string(),
                deduction_rule_type: rule,
                deduction_rule_value: value,
                deduction_rule_threshold: Some(Decimal::from(threshold)),
            };

            let result = evaluate_deduction(
                &exc,
                Decimal::new(count_tenths, 1),
                Decimal::new(daily_cents, 2),
                1,
            ).unwrap();
            prop_assert!(result.amount >= Decimal::ZERO);
        }

        #[test]
        fn prop_tiered_matches_clamped_formula(
            value in 0i64..1_000,
            threshold in 0i64..30,
            count in 0i64..60,
        ) {
            let exc = AttendanceExceptionType {
                id: "tier".to_string(),
                name: "Tier".to_string(),
                deduction_rule_type: DeductionRuleType::TieredCount,
                deduction_rule_value: Decimal::from(value),
                deduction_rule_threshold: Some(Decimal::from(threshold)),
            };

            let result = evaluate_deduction(&exc, Decimal::from(count), Decimal::ZERO, 1).unwrap();
            let expected = Decimal::from(value * (count - threshold).max(0));
            prop_assert_eq!(result.amount, expected);
        }
    }
}
