//! The payroll engine facade.
//!
//! [`PayrollEngine`] wires the store, the calculation settings and the
//! calculation pipeline together and exposes the single-employee and batch
//! operations used by the API and by embedding applications.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::calculation::{
    BatchPayrollRunner, CancellationFlag, FormulaEvaluator, PayslipComposer, aggregate_attendance,
    resolve_salary_group,
};
use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{BatchResult, Employee, PayPeriod, Payslip};
use crate::store::PayrollStore;

/// Calculates payslips from a [`PayrollStore`].
///
/// Calculation is a pure function of the store contents, the settings and
/// the period: calling it twice without changing the store gives identical
/// payslips, audit trace included. The engine is cheap to clone and safe to
/// share across threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use payroll_engine::config::EngineSettings;
/// use payroll_engine::engine::PayrollEngine;
/// use payroll_engine::models::{Employee, PayPeriod};
/// use payroll_engine::store::InMemoryStore;
/// use rust_decimal::Decimal;
///
/// let mut store = InMemoryStore::new();
/// store.insert_employee(Employee {
///     id: "emp_001".to_string(),
///     name: "Li Wei".to_string(),
///     department_id: None,
///     position_id: None,
///     base_salary: Decimal::new(3000, 0),
///     active: true,
/// });
///
/// let engine = PayrollEngine::new(Arc::new(store), EngineSettings::default()).unwrap();
/// let payslip = engine
///     .calculate_employee_salary("emp_001", PayPeriod::new(2026, 1).unwrap())
///     .unwrap();
/// assert_eq!(payslip.net_pay, Decimal::new(3000, 0));
/// ```
#[derive(Clone)]
pub struct PayrollEngine {
    store: Arc<dyn PayrollStore>,
    settings: EngineSettings,
    composer: PayslipComposer,
}

impl PayrollEngine {
    /// Creates an engine over `store`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the settings are out of range.
    pub fn new(store: Arc<dyn PayrollStore>, settings: EngineSettings) -> EngineResult<Self> {
        settings.validate()?;
        let composer = PayslipComposer::with_default_formula(settings.calculation.clone());
        Ok(Self {
            store,
            settings,
            composer,
        })
    }

    /// Replaces the formula evaluator used for formula salary items.
    pub fn with_formula_evaluator(mut self, formula: Arc<dyn FormulaEvaluator>) -> Self {
        self.composer = PayslipComposer::new(self.settings.calculation.clone(), formula);
        self
    }

    /// The settings in effect.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The backing store.
    pub fn store(&self) -> &dyn PayrollStore {
        self.store.as_ref()
    }

    /// Calculates one employee's payslip for `period`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::EmployeeNotFound`] if the employee does not exist
    /// - a data-integrity error if a referenced group, item or exception
    ///   type is missing or a rule is invalid
    /// - [`EngineError::Storage`] if a lookup fails
    pub fn calculate_employee_salary(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> EngineResult<Payslip> {
        debug!(employee_id = %employee_id, period = %period, "Calculating payslip");

        let employee = self
            .store
            .get_employee(employee_id)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })?;
        let employee = match self.store.get_employee_base_salary(employee_id)? {
            Some(base_salary) => Employee {
                base_salary,
                ..employee
            },
            None => employee,
        };

        let group = resolve_salary_group(
            self.store.as_ref(),
            &employee.id,
            employee.department_id.as_deref(),
            employee.position_id.as_deref(),
        )?;

        let records =
            self.store
                .get_attendance_records(&employee.id, period.start_date(), period.end_date())?;
        let aggregated = aggregate_attendance(&employee.id, &period, &records);

        let mut exception_types = HashMap::with_capacity(aggregated.len());
        for exception in &aggregated {
            let exception_type = self
                .store
                .get_exception_type(&exception.exception_type_id)?;
            if let Some(exception_type) = exception_type {
                exception_types.insert(exception_type.id.clone(), exception_type);
            }
        }

        let payslip = self.composer.compose(
            &employee,
            group.as_ref(),
            &aggregated,
            &exception_types,
            period,
        )?;

        if payslip.has_configuration_gap() {
            warn!(
                employee_id = %employee.id,
                "No salary group resolved; payslip contains base salary only"
            );
        }
        if payslip.needs_review() {
            warn!(
                employee_id = %employee.id,
                net_pay = %payslip.net_pay,
                anomalies = payslip.anomalies.len(),
                "Payslip flagged for review"
            );
        }
        debug!(
            employee_id = %employee.id,
            gross_earnings = %payslip.gross_earnings,
            total_deductions = %payslip.total_deductions,
            net_pay = %payslip.net_pay,
            "Payslip calculated"
        );

        Ok(payslip)
    }

    /// Calculates every active employee, optionally restricted to one
    /// department, sequentially.
    ///
    /// Per-employee failures are reported in [`BatchResult::failed`]; only a
    /// failure to list the employees aborts the batch.
    pub fn batch_calculate_salary(
        &self,
        period: PayPeriod,
        department_id: Option<&str>,
    ) -> EngineResult<BatchResult> {
        let employee_ids = self.store.list_employee_ids(department_id)?;
        info!(
            period = %period,
            department_id = department_id.unwrap_or("*"),
            employees = employee_ids.len(),
            "Batch payroll requested"
        );
        Ok(self.run_batch(&employee_ids, period))
    }

    /// Calculates an explicit list of employees sequentially.
    ///
    /// Duplicate ids are calculated once; unknown ids fail individually.
    pub fn run_batch(&self, employee_ids: &[String], period: PayPeriod) -> BatchResult {
        BatchPayrollRunner::new(self.settings.batch.max_concurrency).run(
            employee_ids,
            period,
            |id, period| self.calculate_employee_salary(id, period),
        )
    }

    /// Like [`batch_calculate_salary`](Self::batch_calculate_salary) but
    /// calculates up to `batch.max_concurrency` employees at once.
    ///
    /// Cancelling `cancellation` stops dispatching; employees not yet started
    /// are reported in [`BatchResult::skipped`].
    pub async fn batch_calculate_salary_concurrent(
        &self,
        period: PayPeriod,
        department_id: Option<&str>,
        cancellation: Option<CancellationFlag>,
    ) -> EngineResult<BatchResult> {
        let employee_ids = self.store.list_employee_ids(department_id)?;
        info!(
            period = %period,
            department_id = department_id.unwrap_or("*"),
            employees = employee_ids.len(),
            "Concurrent batch payroll requested"
        );

        let mut runner = BatchPayrollRunner::new(self.settings.batch.max_concurrency);
        if let Some(flag) = cancellation {
            runner = runner.with_cancellation(flag);
        }

        let engine = self.clone();
        Ok(runner
            .run_concurrent(&employee_ids, period, move |id, period| {
                engine.calculate_employee_salary(id, period)
            })
            .await)
    }
}
