//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed structures deserialized from the
//! engine settings file and from the YAML files of a payroll dataset.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceExceptionType, AttendanceRecord, Employee, SalaryGroup, SalaryItem};

/// Calculation policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalculationSettings {
    /// Working days per period; gross earnings divided by this is the daily salary.
    pub standard_working_days: Decimal,
    /// Keep negative net pay (flagged) instead of clamping it to zero.
    pub allow_negative_net_pay: bool,
    /// Decimal places every item and deduction amount is rounded to.
    pub money_scale: u32,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            standard_working_days: Decimal::new(2175, 2),
            allow_negative_net_pay: true,
            money_scale: 2,
        }
    }
}

/// Batch runner settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Maximum employees calculated at once by the concurrent runner.
    pub max_concurrency: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self { max_concurrency: 4 }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address the API binds to.
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// The complete engine settings loaded from `engine.yaml`.
///
/// Every section and key is optional and falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Calculation policy.
    pub calculation: CalculationSettings,
    /// Batch runner settings.
    pub batch: BatchSettings,
    /// HTTP server settings.
    pub server: ServerSettings,
}

impl EngineSettings {
    /// Checks every value against its allowed range.
    pub fn validate(&self) -> EngineResult<()> {
        if self.calculation.standard_working_days <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "calculation.standard_working_days".to_string(),
                message: format!(
                    "must be greater than zero, got {}",
                    self.calculation.standard_working_days
                ),
            });
        }
        if self.calculation.money_scale > 10 {
            return Err(EngineError::InvalidConfig {
                field: "calculation.money_scale".to_string(),
                message: format!("must be at most 10, got {}", self.calculation.money_scale),
            });
        }
        if self.batch.max_concurrency == 0 {
            return Err(EngineError::InvalidConfig {
                field: "batch.max_concurrency".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// `employees.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesFile {
    /// All employee records.
    pub employees: Vec<Employee>,
}

/// `salary_items.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryItemsFile {
    /// The salary item catalog.
    pub salary_items: Vec<SalaryItem>,
}

/// `salary_groups.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryGroupsFile {
    /// The salary group catalog.
    pub salary_groups: Vec<SalaryGroup>,
}

/// `assignments.yaml`: group ids keyed by employee, department and position id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssignmentsFile {
    /// Direct employee assignments.
    pub employees: HashMap<String, String>,
    /// Department assignments.
    pub departments: HashMap<String, String>,
    /// Position assignments.
    pub positions: HashMap<String, String>,
}

/// `exception_types.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExceptionTypesFile {
    /// The exception type catalog.
    pub exception_types: Vec<AttendanceExceptionType>,
}

/// `attendance.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceFile {
    /// Imported attendance rows.
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
}
