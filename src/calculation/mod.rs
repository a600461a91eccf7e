//! Calculation logic for the payroll engine.
//!
//! The pipeline for one employee is: resolve the salary group, aggregate
//! attendance for the period, evaluate deduction rules, then compose the
//! payslip. [`BatchPayrollRunner`] repeats that pipeline over many employees.

mod aggregator;
mod batch;
mod composer;
mod deduction;
mod formula;
mod resolver;

pub use aggregator::aggregate_attendance;
pub use batch::{BatchPayrollRunner, CancellationFlag};
pub use composer::PayslipComposer;
pub use deduction::{DeductionResult, evaluate_deduction};
pub use formula::{
    ArithmeticFormula, BASE_SALARY_VARIABLE, FormulaError, FormulaEvaluator, FormulaScope,
    MAX_NESTING_DEPTH, SUBTOTAL_VARIABLE, is_reserved_variable,
};
pub use resolver::{ResolvedSalaryGroup, resolve_salary_group};
