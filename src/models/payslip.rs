//! Payslip models.
//!
//! This module contains the [`Payslip`] type and its associated structures
//! that capture all outputs of one employee's salary calculation: itemized
//! earnings, itemized deductions, net pay, anomalies and the audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AssignmentLevel, ComputeMode, DeductionRuleType, PayPeriod};

/// One earnings line, in salary group order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipItemLine {
    /// The salary item id.
    pub item_id: String,
    /// The salary item name.
    pub name: String,
    /// How the amount was computed.
    pub compute_mode: ComputeMode,
    /// The amount contributed to gross earnings.
    pub amount: Decimal,
}

/// One deduction line, per exception type that occurred in the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipDeductionLine {
    /// The exception type id.
    pub exception_type_id: String,
    /// The exception type name.
    pub name: String,
    /// The rule that produced the amount.
    pub rule_type: DeductionRuleType,
    /// Aggregated count/duration for the period.
    pub total_count: Decimal,
    /// The deducted amount (never negative).
    pub amount: Decimal,
}

/// The salary group that applied to the payslip and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedSalaryGroup {
    /// The group id.
    pub group_id: String,
    /// The group name.
    pub name: String,
    /// The assignment level that won the precedence lookup.
    pub source: AssignmentLevel,
}

/// A condition that does not abort the calculation but needs manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationAnomaly {
    /// Deductions exceed gross earnings; the negative net pay was kept.
    NegativeNetPay {
        /// The (negative) net pay on the payslip.
        net_pay: Decimal,
    },
    /// Deductions exceed gross earnings; net pay was clamped to zero.
    NetPayClamped {
        /// The net pay before clamping.
        unclamped_net_pay: Decimal,
    },
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// Contains no timing or identity data so that recomputing the same
/// payslip yields an identical trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The computed earnings, deductions and net pay for one employee and period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AuditTrace, PayPeriod, Payslip};
/// use rust_decimal::Decimal;
///
/// let payslip = Payslip {
///     employee_id: "emp_001".to_string(),
///     period: PayPeriod::new(2026, 1).unwrap(),
///     salary_group: None,
///     base_salary: Decimal::new(3000, 0),
///     item_breakdown: vec![],
///     gross_earnings: Decimal::new(3000, 0),
///     deduction_breakdown: vec![],
///     total_deductions: Decimal::ZERO,
///     net_pay: Decimal::new(3000, 0),
///     anomalies: vec![],
///     audit_trace: AuditTrace::default(),
/// };
/// assert!(payslip.has_configuration_gap());
/// assert!(!payslip.needs_review());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The employee the payslip is for.
    pub employee_id: String,
    /// The payroll period.
    pub period: PayPeriod,
    /// The salary group applied; `None` when no assignment exists at any level.
    pub salary_group: Option<AppliedSalaryGroup>,
    /// Base salary recorded on the employee.
    pub base_salary: Decimal,
    /// Salary group items in declared order.
    pub item_breakdown: Vec<PayslipItemLine>,
    /// `base_salary` plus all item amounts.
    pub gross_earnings: Decimal,
    /// Attendance deductions ordered by exception type id.
    pub deduction_breakdown: Vec<PayslipDeductionLine>,
    /// Sum of all deduction amounts.
    pub total_deductions: Decimal,
    /// Gross earnings minus deductions, subject to the negative-pay policy.
    pub net_pay: Decimal,
    /// Conditions flagged for manual review.
    pub anomalies: Vec<CalculationAnomaly>,
    /// Step-by-step record of the calculation.
    pub audit_trace: AuditTrace,
}

impl Payslip {
    /// True if any anomaly was raised.
    pub fn needs_review(&self) -> bool {
        !self.anomalies.is_empty()
    }

    /// True if the employee had no resolvable salary group.
    pub fn has_configuration_gap(&self) -> bool {
        self.salary_group.is_none()
    }
}
