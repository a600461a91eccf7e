//! Employee model.
//!
//! This module defines the [`Employee`] record the engine reads from the
//! storage collaborator when computing a payslip.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee subject to payroll.
///
/// `base_salary` is the fixed monthly amount recorded directly on the
/// employee. It is always the first earnings component; salary group items
/// are added on top of it.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Li Wei".to_string(),
///     department_id: Some("dept_ops".to_string()),
///     position_id: None,
///     base_salary: Decimal::new(500000, 2),
///     active: true,
/// };
/// assert!(employee.department_id.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The department the employee belongs to, if any.
    #[serde(default)]
    pub department_id: Option<String>,
    /// The employee's position, if any.
    #[serde(default)]
    pub position_id: Option<String>,
    /// Fixed monthly base salary recorded on the employee.
    #[serde(default)]
    pub base_salary: Decimal,
    /// Inactive employees are excluded from department and roster batches.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
