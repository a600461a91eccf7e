//! Payroll Salary Calculation Engine
//!
//! This crate computes monthly payslips: it resolves the salary group that
//! applies to an employee (employee, then department, then position),
//! computes the group's salary items in order, applies attendance
//! deductions, and derives net pay with a step-by-step audit trace.
//! Batches of employees can be run sequentially or concurrently, and the
//! engine is exposed over HTTP by the [`api`] module.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
