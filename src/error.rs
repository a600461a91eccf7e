//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing payslips.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad classification of an [`EngineError`].
///
/// Batch runs record this category next to every failed employee so callers
/// can tell a data problem they must fix from an infrastructure problem they
/// may simply retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Engine settings or dataset files are missing or malformed.
    Configuration,
    /// The caller supplied an invalid argument (e.g. a bad period).
    InvalidInput,
    /// The requested employee does not exist.
    MissingEmployee,
    /// A referenced entity is missing or a rule value violates its invariant.
    DataIntegrity,
    /// The storage collaborator failed.
    Storage,
    /// An arithmetic failure inside the calculation.
    Calculation,
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::{EngineError, ErrorCategory};
///
/// let error = EngineError::SalaryGroupNotFound {
///     group_id: "grp_deleted".to_string(),
///     referenced_by: "department 'ops'".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Salary group 'grp_deleted' referenced by department 'ops' does not exist"
/// );
/// assert_eq!(error.category(), ErrorCategory::DataIntegrity);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value is out of its allowed range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending key.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A pay period could not be parsed or constructed.
    #[error("Invalid pay period '{value}': {message}")]
    InvalidPeriod {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        message: String,
    },

    /// The employee record does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The missing employee id.
        employee_id: String,
    },

    /// An assignment points at a salary group that is not in the catalog.
    #[error("Salary group '{group_id}' referenced by {referenced_by} does not exist")]
    SalaryGroupNotFound {
        /// The dangling group id.
        group_id: String,
        /// Which assignment referenced it.
        referenced_by: String,
    },

    /// A salary group lists an item that is not in the catalog.
    #[error("Salary item '{item_id}' listed in group '{group_id}' does not exist")]
    SalaryItemNotFound {
        /// The dangling item id.
        item_id: String,
        /// The group listing it.
        group_id: String,
    },

    /// An attendance record references an unknown exception type.
    #[error("Attendance exception type not found: {exception_type_id}")]
    ExceptionTypeNotFound {
        /// The dangling exception type id.
        exception_type_id: String,
    },

    /// A deduction rule violates its declared invariant.
    #[error("Invalid deduction rule for exception type '{exception_type_id}': {message}")]
    InvalidDeductionRule {
        /// The exception type carrying the bad rule.
        exception_type_id: String,
        /// What is wrong with it.
        message: String,
    },

    /// Aggregated attendance produced a negative magnitude.
    #[error("Negative exception count {count} for exception type '{exception_type_id}'")]
    NegativeExceptionCount {
        /// The exception type.
        exception_type_id: String,
        /// The offending total.
        count: Decimal,
    },

    /// A formula salary item could not be evaluated.
    #[error("Invalid formula for salary item '{item_id}': {message}")]
    InvalidFormula {
        /// The formula item.
        item_id: String,
        /// Parse or evaluation failure.
        message: String,
    },

    /// The storage collaborator reported a failure.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Classifies the error for batch reporting and API status mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ErrorCategory::Configuration,
            EngineError::InvalidPeriod { .. } => ErrorCategory::InvalidInput,
            EngineError::EmployeeNotFound { .. } => ErrorCategory::MissingEmployee,
            EngineError::SalaryGroupNotFound { .. }
            | EngineError::SalaryItemNotFound { .. }
            | EngineError::ExceptionTypeNotFound { .. }
            | EngineError::InvalidDeductionRule { .. }
            | EngineError::NegativeExceptionCount { .. }
            | EngineError::InvalidFormula { .. } => ErrorCategory::DataIntegrity,
            EngineError::Storage { .. } => ErrorCategory::Storage,
            EngineError::CalculationError { .. } => ErrorCategory::Calculation,
        }
    }

    /// Returns true for the data-integrity family of errors.
    pub fn is_data_integrity(&self) -> bool {
        self.category() == ErrorCategory::DataIntegrity
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
