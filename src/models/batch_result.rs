//! Batch result models.
//!
//! This module contains [`BatchResult`], the outcome of running payroll for
//! many employees at once, and [`BatchFailure`], the per-employee failure
//! record that keeps one bad employee from blocking the rest.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorCategory};

use super::{PayPeriod, Payslip};

/// A single employee whose calculation failed during a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The employee whose calculation failed.
    pub employee_id: String,
    /// The classified reason.
    pub category: ErrorCategory,
    /// The error message.
    pub message: String,
}

impl BatchFailure {
    /// Builds a failure record from the error that aborted the employee.
    pub fn from_error(employee_id: impl Into<String>, error: &EngineError) -> Self {
        Self {
            employee_id: employee_id.into(),
            category: error.category(),
            message: error.to_string(),
        }
    }
}

/// The outcome of one batch payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// The payroll period.
    pub period: PayPeriod,
    /// Payslips produced, in input order.
    pub succeeded: Vec<Payslip>,
    /// Employees whose calculation failed, in input order.
    pub failed: Vec<BatchFailure>,
    /// Employees never dispatched because the batch was cancelled.
    #[serde(default)]
    pub skipped: Vec<String>,
    /// Sum of gross earnings over `succeeded`.
    pub total_gross: Decimal,
    /// Sum of net pay over `succeeded`.
    pub total_net: Decimal,
}

impl BatchResult {
    /// Creates an empty result for the period.
    pub fn new(period: PayPeriod) -> Self {
        Self {
            period,
            succeeded: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
            total_gross: Decimal::ZERO,
            total_net: Decimal::ZERO,
        }
    }

    /// Records a successful payslip.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CalculationError`] if adding the payslip would
    /// overflow either batch total. The result is left unchanged.
    pub fn push_success(&mut self, payslip: Payslip) -> Result<(), EngineError> {
        let overflow = |total: &str| EngineError::CalculationError {
            message: format!(
                "batch {} overflowed when adding employee '{}'",
                total, payslip.employee_id
            ),
        };
        let total_gross = self
            .total_gross
            .checked_add(payslip.gross_earnings)
            .ok_or_else(|| overflow("total_gross"))?;
        let total_net = self
            .total_net
            .checked_add(payslip.net_pay)
            .ok_or_else(|| overflow("total_net"))?;

        self.total_gross = total_gross;
        self.total_net = total_net;
        self.succeeded.push(payslip);
        Ok(())
    }

    /// Records a failed employee.
    pub fn push_failure(&mut self, failure: BatchFailure) {
        self.failed.push(failure);
    }

    /// Number of employees that produced an outcome or were skipped.
    pub fn processed(&self) -> usize {
        self.succeeded.len() + self.failed.len() + self.skipped.len()
    }

    /// True if every employee produced a payslip.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}
