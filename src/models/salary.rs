//! Salary catalog models.
//!
//! This module defines the [`SalaryItem`] catalog entries, the ordered
//! [`SalaryGroup`] bundles built from them, and the [`AssignmentLevel`]
//! at which a group can be attached to an employee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a salary item's amount is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputeMode {
    /// The item's value is paid as-is.
    Fixed,
    /// `value * running subtotal` of everything resolved before the item.
    PercentageOfBase,
    /// The item's formula is evaluated against earlier items.
    Formula,
}

/// A named compensation component.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ComputeMode, SalaryItem};
/// use rust_decimal::Decimal;
///
/// let overtime = SalaryItem {
///     id: "overtime".to_string(),
///     name: "Overtime allowance".to_string(),
///     compute_mode: ComputeMode::PercentageOfBase,
///     value: Decimal::new(10, 2),
///     formula: None,
///     order: 2,
/// };
/// assert_eq!(overtime.compute_mode, ComputeMode::PercentageOfBase);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryItem {
    /// Unique identifier; also the variable name formulas use to refer to it.
    pub id: String,
    /// Display name.
    pub name: String,
    /// How the amount is derived.
    pub compute_mode: ComputeMode,
    /// Amount for fixed items, fraction (0.10 = 10%) for percentage items.
    #[serde(default)]
    pub value: Decimal,
    /// Expression for formula items.
    #[serde(default)]
    pub formula: Option<String>,
    /// Catalog display order. Calculation order comes from the group.
    #[serde(default)]
    pub order: i32,
}

/// An ordered bundle of salary items assignable to an employee,
/// department or position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryGroup {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Item ids in calculation order.
    #[serde(default)]
    pub items: Vec<String>,
}

/// The level at which a salary group assignment was found.
///
/// Variants are declared in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentLevel {
    /// Assigned directly to the employee.
    Employee,
    /// Inherited from the employee's department.
    Department,
    /// Inherited from the employee's position.
    Position,
}

impl AssignmentLevel {
    /// Lower-case name used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentLevel::Employee => "employee",
            AssignmentLevel::Department => "department",
            AssignmentLevel::Position => "position",
        }
    }
}
