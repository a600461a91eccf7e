//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod batch_result;
mod employee;
mod pay_period;
mod payslip;
mod salary;

pub use attendance::{
    AggregatedException, AttendanceExceptionType, AttendanceRecord, DeductionRuleType,
};
pub use batch_result::{BatchFailure, BatchResult};
pub use employee::Employee;
pub use pay_period::PayPeriod;
pub use payslip::{
    AppliedSalaryGroup, AuditStep, AuditTrace, AuditWarning, CalculationAnomaly, Payslip,
    PayslipDeductionLine, PayslipItemLine,
};
pub use salary::{AssignmentLevel, ComputeMode, SalaryGroup, SalaryItem};
