//! Payslip composition.
//!
//! Combines an employee's base salary, the resolved salary group and the
//! aggregated attendance exceptions into a [`Payslip`]. Items are reduced
//! left to right over a running subtotal, so the group's item sequence is
//! part of the calculation semantics.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::json;

use super::deduction::evaluate_deduction;
use super::formula::{
    ArithmeticFormula, BASE_SALARY_VARIABLE, FormulaError, FormulaEvaluator, FormulaScope,
    SUBTOTAL_VARIABLE, is_reserved_variable,
};
use super::resolver::ResolvedSalaryGroup;
use crate::config::CalculationSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AggregatedException, AppliedSalaryGroup, AttendanceExceptionType, AuditStep, AuditTrace,
    AuditWarning, CalculationAnomaly, ComputeMode, Employee, PayPeriod, Payslip,
    PayslipDeductionLine, PayslipItemLine, SalaryItem,
};

/// Builds payslips from resolved inputs.
///
/// The composer performs no lookups; the engine gathers everything it needs
/// from the store first. Amounts are rounded to `money_scale` decimal places
/// (midpoint away from zero) per line, and the running subtotal carries the
/// rounded amounts so that gross earnings always equal the sum of the lines.
#[derive(Clone)]
pub struct PayslipComposer {
    settings: CalculationSettings,
    formula: Arc<dyn FormulaEvaluator>,
}

struct ItemState {
    subtotal: Decimal,
    scope: FormulaScope,
    lines: Vec<PayslipItemLine>,
}

impl PayslipComposer {
    /// Creates a composer with a custom formula evaluator.
    pub fn new(settings: CalculationSettings, formula: Arc<dyn FormulaEvaluator>) -> Self {
        Self { settings, formula }
    }

    /// Creates a composer using [`ArithmeticFormula`].
    pub fn with_default_formula(settings: CalculationSettings) -> Self {
        Self::new(settings, Arc::new(ArithmeticFormula))
    }

    /// The calculation policy in effect.
    pub fn settings(&self) -> &CalculationSettings {
        &self.settings
    }

    /// Composes the payslip for one employee and period.
    ///
    /// `aggregated` must already be restricted to the period; deduction lines
    /// follow its order. `exception_types` must contain every exception type
    /// referenced by `aggregated`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidFormula`] if a formula item cannot be evaluated
    /// - [`EngineError::ExceptionTypeNotFound`] if an exception type is missing
    /// - [`EngineError::InvalidDeductionRule`] / [`EngineError::NegativeExceptionCount`]
    ///   from the deduction evaluator
    /// - [`EngineError::CalculationError`] on decimal overflow
    pub fn compose(
        &self,
        employee: &Employee,
        group: Option<&ResolvedSalaryGroup>,
        aggregated: &[AggregatedException],
        exception_types: &HashMap<String, AttendanceExceptionType>,
        period: PayPeriod,
    ) -> EngineResult<Payslip> {
        let mut steps = Vec::new();
        let mut warnings = Vec::new();
        let mut step_number: u32 = 1;

        steps.push(group_resolution_step(employee, group, step_number));
        step_number += 1;
        if group.is_none() {
            warnings.push(AuditWarning {
                code: "NO_SALARY_GROUP".to_string(),
                message: format!(
                    "No salary group assigned to employee '{}', its department or position; \
                     paying base salary only",
                    employee.id
                ),
                severity: "medium".to_string(),
            });
        }

        let base_salary = self.round(employee.base_salary);
        steps.push(AuditStep {
            step_number,
            rule_id: "base_salary".to_string(),
            rule_name: "Base Salary".to_string(),
            input: json!({ "base_salary": employee.base_salary.normalize().to_string() }),
            output: json!({ "subtotal": base_salary.to_string() }),
            reasoning: format!("Running subtotal starts at base salary ${}", base_salary),
        });
        step_number += 1;

        let items = group.map(|g| g.items.as_slice()).unwrap_or_default();
        let initial = ItemState {
            subtotal: base_salary,
            scope: FormulaScope::new().with(BASE_SALARY_VARIABLE, base_salary),
            lines: Vec::with_capacity(items.len()),
        };
        let state = items.iter().try_fold(initial, |state, item| {
            let next = self.apply_item(state, item, items, step_number, &mut steps);
            step_number += 1;
            next
        })?;

        let gross_earnings = state.subtotal;
        let daily_salary = gross_earnings
            .checked_div(self.settings.standard_working_days)
            .ok_or_else(|| EngineError::CalculationError {
                message: "daily salary could not be derived from gross earnings".to_string(),
            })?;
        steps.push(AuditStep {
            step_number,
            rule_id: "gross_earnings".to_string(),
            rule_name: "Gross Earnings".to_string(),
            input: json!({
                "base_salary": base_salary.to_string(),
                "item_count": state.lines.len(),
                "standard_working_days": self.settings.standard_working_days.normalize().to_string()
            }),
            output: json!({
                "gross_earnings": gross_earnings.to_string(),
                "daily_salary": daily_salary.normalize().to_string()
            }),
            reasoning: format!(
                "Gross earnings ${} / {} working days = daily salary ${}",
                gross_earnings,
                self.settings.standard_working_days.normalize(),
                daily_salary.round_dp(4).normalize()
            ),
        });
        step_number += 1;

        let mut deduction_breakdown = Vec::with_capacity(aggregated.len());
        for exception in aggregated {
            let exception_type = exception_types
                .get(&exception.exception_type_id)
                .ok_or_else(|| EngineError::ExceptionTypeNotFound {
                    exception_type_id: exception.exception_type_id.clone(),
                })?;
            let result = evaluate_deduction(
                exception_type,
                exception.total_count,
                daily_salary,
                step_number,
            )?;
            steps.push(result.audit_step);
            step_number += 1;

            deduction_breakdown.push(PayslipDeductionLine {
                exception_type_id: exception_type.id.clone(),
                name: exception_type.name.clone(),
                rule_type: exception_type.deduction_rule_type,
                total_count: exception.total_count,
                amount: self.round(result.amount),
            });
        }

        let total_deductions = deduction_breakdown
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.amount))
            .ok_or_else(|| overflow("total deductions"))?;
        let unclamped_net_pay = gross_earnings
            .checked_sub(total_deductions)
            .ok_or_else(|| overflow("net pay"))?;

        let mut anomalies = Vec::new();
        let net_pay = if unclamped_net_pay >= Decimal::ZERO {
            unclamped_net_pay
        } else if self.settings.allow_negative_net_pay {
            anomalies.push(CalculationAnomaly::NegativeNetPay {
                net_pay: unclamped_net_pay,
            });
            warnings.push(AuditWarning {
                code: "NEGATIVE_NET_PAY".to_string(),
                message: format!(
                    "Deductions ${} exceed gross earnings ${}; net pay is ${}",
                    total_deductions, gross_earnings, unclamped_net_pay
                ),
                severity: "high".to_string(),
            });
            unclamped_net_pay
        } else {
            anomalies.push(CalculationAnomaly::NetPayClamped { unclamped_net_pay });
            warnings.push(AuditWarning {
                code: "NET_PAY_CLAMPED".to_string(),
                message: format!(
                    "Deductions ${} exceed gross earnings ${}; net pay ${} clamped to zero",
                    total_deductions, gross_earnings, unclamped_net_pay
                ),
                severity: "high".to_string(),
            });
            Decimal::ZERO
        };

        steps.push(AuditStep {
            step_number,
            rule_id: "net_pay".to_string(),
            rule_name: "Net Pay".to_string(),
            input: json!({
                "gross_earnings": gross_earnings.to_string(),
                "total_deductions": total_deductions.to_string(),
                "allow_negative_net_pay": self.settings.allow_negative_net_pay
            }),
            output: json!({ "net_pay": net_pay.to_string() }),
            reasoning: format!(
                "${} gross - ${} deductions = ${}",
                gross_earnings, total_deductions, net_pay
            ),
        });

        Ok(Payslip {
            employee_id: employee.id.clone(),
            period,
            salary_group: group.map(|g| AppliedSalaryGroup {
                group_id: g.group.id.clone(),
                name: g.group.name.clone(),
                source: g.source,
            }),
            base_salary,
            item_breakdown: state.lines,
            gross_earnings,
            deduction_breakdown,
            total_deductions,
            net_pay,
            anomalies,
            audit_trace: AuditTrace { steps, warnings },
        })
    }

    fn apply_item(
        &self,
        state: ItemState,
        item: &SalaryItem,
        group_items: &[SalaryItem],
        step_number: u32,
        steps: &mut Vec<AuditStep>,
    ) -> EngineResult<ItemState> {
        if is_reserved_variable(&item.id) {
            return Err(EngineError::InvalidFormula {
                item_id: item.id.clone(),
                message: format!(
                    "salary item id '{}' collides with a reserved formula variable",
                    item.id
                ),
            });
        }

        let ItemState {
            subtotal,
            scope,
            mut lines,
        } = state;

        let (raw, input, reasoning) = match item.compute_mode {
            ComputeMode::Fixed => (
                item.value,
                json!({ "value": item.value.normalize().to_string() }),
                format!("Fixed amount ${}", item.value.normalize()),
            ),
            ComputeMode::PercentageOfBase => {
                let amount = item
                    .value
                    .checked_mul(subtotal)
                    .ok_or_else(|| overflow(&item.id))?;
                (
                    amount,
                    json!({
                        "value": item.value.normalize().to_string(),
                        "subtotal": subtotal.to_string()
                    }),
                    format!(
                        "{} x running subtotal ${}",
                        item.value.normalize(),
                        subtotal
                    ),
                )
            }
            ComputeMode::Formula => {
                let expression =
                    item.formula
                        .as_deref()
                        .ok_or_else(|| EngineError::InvalidFormula {
                            item_id: item.id.clone(),
                            message: "formula item has no expression".to_string(),
                        })?;
                let visible = scope.clone().with(SUBTOTAL_VARIABLE, subtotal);
                let amount = self
                    .formula
                    .evaluate(expression, &visible)
                    .map_err(|err| formula_error(item, group_items, err))?;
                (
                    amount,
                    json!({
                        "formula": expression,
                        "subtotal": subtotal.to_string()
                    }),
                    format!("Evaluated '{}'", expression),
                )
            }
        };

        let amount = self.round(raw);
        let next_subtotal = subtotal
            .checked_add(amount)
            .ok_or_else(|| overflow(&item.id))?;

        steps.push(AuditStep {
            step_number,
            rule_id: format!("salary_item_{}", compute_mode_name(item.compute_mode)),
            rule_name: format!("Salary Item: {}", item.name),
            input,
            output: json!({
                "amount": amount.to_string(),
                "subtotal": next_subtotal.to_string()
            }),
            reasoning: format!("{} = ${}", reasoning, amount),
        });

        lines.push(PayslipItemLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            compute_mode: item.compute_mode,
            amount,
        });

        Ok(ItemState {
            subtotal: next_subtotal,
            scope: scope.with(item.id.clone(), amount),
            lines,
        })
    }

    fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(
            self.settings.money_scale,
            RoundingStrategy::MidpointAwayFromZero,
        )
    }
}

fn compute_mode_name(mode: ComputeMode) -> &'static str {
    match mode {
        ComputeMode::Fixed => "fixed",
        ComputeMode::PercentageOfBase => "percentage_of_base",
        ComputeMode::Formula => "formula",
    }
}

fn formula_error(item: &SalaryItem, group_items: &[SalaryItem], err: FormulaError) -> EngineError {
    let message = match &err {
        FormulaError::UnknownVariable(name) if group_items.iter().any(|i| &i.id == name) => {
            format!("'{}' is resolved after '{}' in the salary group", name, item.id)
        }
        _ => err.to_string(),
    };
    EngineError::InvalidFormula {
        item_id: item.id.clone(),
        message,
    }
}

fn overflow(what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("decimal overflow computing {}", what),
    }
}

fn group_resolution_step(
    employee: &Employee,
    group: Option<&ResolvedSalaryGroup>,
    step_number: u32,
) -> AuditStep {
    let (output, reasoning) = match group {
        Some(g) => (
            json!({
                "group_id": g.group.id,
                "source": g.source.as_str(),
                "items": g.items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>()
            }),
            format!(
                "Salary group '{}' applies via {} assignment",
                g.group.id,
                g.source.as_str()
            ),
        ),
        None => (
            json!({ "group_id": null }),
            "No assignment at employee, department or position level".to_string(),
        ),
    };

    AuditStep {
        step_number,
        rule_id: "salary_group_resolution".to_string(),
        rule_name: "Salary Group Resolution".to_string(),
        input: json!({
            "employee_id": employee.id,
            "department_id": employee.department_id,
            "position_id": employee.position_id
        }),
        output,
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentLevel, DeductionRuleType, SalaryGroup};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn period() -> PayPeriod {
        PayPeriod::new(2026, 1).unwrap()
    }

    fn employee(base_salary: &str) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Test Employee".to_string(),
            department_id: Some("dept_eng".to_string()),
            position_id: None,
            base_salary: dec(base_salary),
            active: true,
        }
    }

    fn fixed(id: &str, value: &str) -> SalaryItem {
        SalaryItem {
            id: id.to_string(),
            name: id.to_string(),
            compute_mode: ComputeMode::Fixed,
            value: dec(value),
            formula: None,
            order: 0,
        }
    }

    fn percentage(id: &str, value: &str) -> SalaryItem {
        SalaryItem {
            compute_mode: ComputeMode::PercentageOfBase,
            ..fixed(id, value)
        }
    }

    fn formula(id: &str, expression: &str) -> SalaryItem {
        SalaryItem {
            compute_mode: ComputeMode::Formula,
            formula: Some(expression.to_string()),
            ..fixed(id, "0")
        }
    }

    fn resolved(items: Vec<SalaryItem>) -> ResolvedSalaryGroup {
        ResolvedSalaryGroup {
            group: SalaryGroup {
                id: "grp_test".to_string(),
                name: "Test group".to_string(),
                items: items.iter().map(|i| i.id.clone()).collect(),
            },
            source: AssignmentLevel::Department,
            items,
        }
    }

    fn exception_types(
        types: Vec<AttendanceExceptionType>,
    ) -> HashMap<String, AttendanceExceptionType> {
        types.into_iter().map(|t| (t.id.clone(), t)).collect()
    }

    fn exception_type(
        id: &str,
        rule: DeductionRuleType,
        value: &str,
        threshold: Option<&str>,
    ) -> AttendanceExceptionType {
        AttendanceExceptionType {
            id: id.to_string(),
            name: id.to_string(),
            deduction_rule_type: rule,
            deduction_rule_value: dec(value),
            deduction_rule_threshold: threshold.map(dec),
        }
    }

    fn aggregated(id: &str, count: &str) -> AggregatedException {
        AggregatedException {
            exception_type_id: id.to_string(),
            total_count: dec(count),
        }
    }

    fn composer() -> PayslipComposer {
        PayslipComposer::with_default_formula(CalculationSettings::default())
    }

    fn compose_items(base_salary: &str, items: Vec<SalaryItem>) -> EngineResult<Payslip> {
        let group = resolved(items);
        composer().compose(&employee(base_salary), Some(&group), &[], &HashMap::new(), period())
    }

    #[test]
    fn test_fixed_then_percentage() {
        let payslip =
            compose_items("0", vec![fixed("a", "1000"), percentage("b", "0.10")]).unwrap();

        let amounts: Vec<Decimal> = payslip.item_breakdown.iter().map(|l| l.amount).collect();
        assert_eq!(amounts, vec![dec("1000"), dec("100")]);
        assert_eq!(payslip.gross_earnings, dec("1100"));
        assert_eq!(payslip.net_pay, dec("1100"));
    }

    #[test]
    fn test_item_order_changes_result() {
        let payslip =
            compose_items("0", vec![percentage("b", "0.10"), fixed("a", "1000")]).unwrap();

        let amounts: Vec<Decimal> = payslip.item_breakdown.iter().map(|l| l.amount).collect();
        assert_eq!(amounts, vec![dec("0"), dec("1000")]);
        assert_eq!(payslip.gross_earnings, dec("1000"));
    }

    #[test]
    fn test_percentage_applies_to_base_and_earlier_items() {
        let payslip = compose_items(
            "3000",
            vec![fixed("meal", "1000"), percentage("bonus", "0.10")],
        )
        .unwrap();

        assert_eq!(payslip.item_breakdown[1].amount, dec("400"));
        assert_eq!(payslip.gross_earnings, dec("4400"));
    }

    #[test]
    fn test_gross_equals_base_plus_item_lines() {
        let payslip = compose_items(
            "1000.05",
            vec![percentage("half", "0.5"), fixed("meal", "12.345")],
        )
        .unwrap();

        assert_eq!(payslip.item_breakdown[0].amount, dec("500.03"));
        assert_eq!(payslip.item_breakdown[1].amount, dec("12.35"));
        let sum: Decimal = payslip.item_breakdown.iter().map(|l| l.amount).sum();
        assert_eq!(payslip.gross_earnings, payslip.base_salary + sum);
        assert_eq!(payslip.gross_earnings, dec("1512.43"));
    }

    #[test]
    fn test_no_salary_group_pays_base_only() {
        let payslip = composer()
            .compose(&employee("3500"), None, &[], &HashMap::new(), period())
            .unwrap();

        assert!(payslip.has_configuration_gap());
        assert!(payslip.item_breakdown.is_empty());
        assert_eq!(payslip.gross_earnings, dec("3500"));
        assert_eq!(payslip.net_pay, dec("3500"));
        assert!(payslip
            .audit_trace
            .warnings
            .iter()
            .any(|w| w.code == "NO_SALARY_GROUP"));
    }

    #[test]
    fn test_no_attendance_means_no_deductions() {
        let payslip = compose_items("3000", vec![fixed("meal", "300")]).unwrap();

        assert!(payslip.deduction_breakdown.is_empty());
        assert_eq!(payslip.total_deductions, Decimal::ZERO);
        assert_eq!(payslip.net_pay, payslip.gross_earnings);
        assert!(!payslip.needs_review());
    }

    #[test]
    fn test_deductions_follow_aggregates() {
        let types = exception_types(vec![
            exception_type("absence", DeductionRuleType::PerDaySalary, "0.5", None),
            exception_type("late", DeductionRuleType::TieredCount, "50", Some("3")),
        ]);
        let totals = vec![aggregated("absence", "3"), aggregated("late", "5")];

        // 4350 / 21.75 = 200 daily
        let payslip = composer()
            .compose(&employee("4350"), None, &totals, &types, period())
            .unwrap();

        let amounts: Vec<(&str, Decimal)> = payslip
            .deduction_breakdown
            .iter()
            .map(|l| (l.exception_type_id.as_str(), l.amount))
            .collect();
        assert_eq!(amounts, vec![("absence", dec("300")), ("late", dec("100"))]);
        assert_eq!(payslip.total_deductions, dec("400"));
        assert_eq!(payslip.net_pay, dec("3950"));
    }

    #[test]
    fn test_zero_amount_deduction_line_kept() {
        let types = exception_types(vec![exception_type(
            "late",
            DeductionRuleType::TieredCount,
            "50",
            Some("3"),
        )]);
        let payslip = composer()
            .compose(&employee("3000"), None, &[aggregated("late", "2")], &types, period())
            .unwrap();

        assert_eq!(payslip.deduction_breakdown.len(), 1);
        assert_eq!(payslip.deduction_breakdown[0].amount, Decimal::ZERO);
        assert_eq!(payslip.net_pay, dec("3000"));
    }

    #[test]
    fn test_missing_exception_type_is_integrity_error() {
        let result = composer().compose(
            &employee("3000"),
            None,
            &[aggregated("ghost", "1")],
            &HashMap::new(),
            period(),
        );
        assert!(matches!(
            result,
            Err(EngineError::ExceptionTypeNotFound { exception_type_id })
                if exception_type_id == "ghost"
        ));
    }

    #[test]
    fn test_negative_net_pay_kept_and_flagged() {
        let types = exception_types(vec![exception_type(
            "fine",
            DeductionRuleType::Fixed,
            "300",
            None,
        )]);
        let payslip = composer()
            .compose(&employee("100"), None, &[aggregated("fine", "1")], &types, period())
            .unwrap();

        assert_eq!(payslip.net_pay, dec("-200"));
        assert_eq!(
            payslip.anomalies,
            vec![CalculationAnomaly::NegativeNetPay { net_pay: dec("-200") }]
        );
        assert!(payslip.needs_review());
    }

    #[test]
    fn test_negative_net_pay_clamped_when_disallowed() {
        let settings = CalculationSettings {
            allow_negative_net_pay: false,
            ..CalculationSettings::default()
        };
        let types = exception_types(vec![exception_type(
            "fine",
            DeductionRuleType::Fixed,
            "300",
            None,
        )]);
        let payslip = PayslipComposer::with_default_formula(settings)
            .compose(&employee("100"), None, &[aggregated("fine", "1")], &types, period())
            .unwrap();

        assert_eq!(payslip.net_pay, Decimal::ZERO);
        assert_eq!(payslip.total_deductions, dec("300"));
        assert_eq!(
            payslip.anomalies,
            vec![CalculationAnomaly::NetPayClamped {
                unclamped_net_pay: dec("-200")
            }]
        );
        assert!(payslip
            .audit_trace
            .warnings
            .iter()
            .any(|w| w.code == "NET_PAY_CLAMPED" && w.severity == "high"));
    }

    #[test]
    fn test_formula_sees_earlier_items() {
        let payslip = compose_items(
            "4000",
            vec![
                fixed("meal", "300"),
                fixed("transport", "200"),
                formula("bonus", "(meal + transport) * 2"),
            ],
        )
        .unwrap();

        assert_eq!(payslip.item_breakdown[2].amount, dec("1000"));
        assert_eq!(payslip.gross_earnings, dec("5500"));
    }

    #[test]
    fn test_formula_sees_subtotal_and_base() {
        let payslip = compose_items(
            "4000",
            vec![fixed("meal", "300"), formula("bonus", "subtotal - base_salary")],
        )
        .unwrap();
        assert_eq!(payslip.item_breakdown[1].amount, dec("300"));
    }

    #[test]
    fn test_formula_cannot_see_later_items() {
        let result = compose_items(
            "4000",
            vec![formula("bonus", "meal * 2"), fixed("meal", "300")],
        );

        match result {
            Err(EngineError::InvalidFormula { item_id, message }) => {
                assert_eq!(item_id, "bonus");
                assert!(message.contains("resolved after"));
            }
            other => panic!("Expected InvalidFormula, got {:?}", other),
        }
    }

    #[test]
    fn test_item_id_cannot_shadow_reserved_variable() {
        let result = compose_items(
            "4000",
            vec![fixed("subtotal", "1"), formula("bonus", "subtotal * 0.1")],
        );

        match result {
            Err(EngineError::InvalidFormula { item_id, message }) => {
                assert_eq!(item_id, "subtotal");
                assert!(message.contains("reserved"));
            }
            other => panic!("Expected InvalidFormula, got {:?}", other),
        }
    }

    #[test]
    fn test_deeply_nested_formula_is_integrity_error() {
        let expression = format!("{}meal{}", "(".repeat(10_000), ")".repeat(10_000));
        let result = compose_items(
            "4000",
            vec![fixed("meal", "300"), formula("bonus", &expression)],
        );

        let err = result.unwrap_err();
        assert_eq!(err.category(), crate::error::ErrorCategory::DataIntegrity);
        assert!(err.to_string().contains("nested too deeply"));
    }

    #[test]
    fn test_formula_item_without_expression() {
        let item = SalaryItem {
            formula: None,
            ..formula("bonus", "")
        };
        let result = compose_items("4000", vec![item]);
        assert!(matches!(result, Err(EngineError::InvalidFormula { .. })));
    }

    #[test]
    fn test_audit_trace_shape() {
        let payslip = compose_items("3000", vec![fixed("meal", "300")]).unwrap();
        let rule_ids: Vec<&str> = payslip
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();

        assert_eq!(
            rule_ids,
            vec![
                "salary_group_resolution",
                "base_salary",
                "salary_item_fixed",
                "gross_earnings",
                "net_pay"
            ]
        );
        let numbers: Vec<u32> = payslip.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let group = resolved(vec![fixed("meal", "300"), percentage("bonus", "0.15")]);
        let types = exception_types(vec![exception_type(
            "late",
            DeductionRuleType::PerHour,
            "20",
            None,
        )]);
        let totals = vec![aggregated("late", "2.5")];

        let c = composer();
        let first = c
            .compose(&employee("3000"), Some(&group), &totals, &types, period())
            .unwrap();
        let second = c
            .compose(&employee("3000"), Some(&group), &totals, &types, period())
            .unwrap();
        assert_eq!(first, second);
    }
}
