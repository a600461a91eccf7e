//! Request types for the payroll API.

use serde::{Deserialize, Serialize};

use crate::models::PayPeriod;

use super::response::ApiError;

/// Body of `POST /salary/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateSalaryRequest {
    /// The employee to calculate.
    pub employee_id: String,
    /// The period as `YYYY-MM`.
    pub period: String,
}

/// Body of `POST /salary/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSalaryRequest {
    /// The period as `YYYY-MM`.
    pub period: String,
    /// Restricts the batch to one department's active employees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

impl CalculateSalaryRequest {
    /// Checks the employee id and parses the period.
    pub fn validate(&self) -> Result<PayPeriod, ApiError> {
        if self.employee_id.trim().is_empty() {
            return Err(ApiError::validation_error("employee_id must not be empty"));
        }
        parse_period(&self.period)
    }
}

impl BatchSalaryRequest {
    /// Parses the period and normalises an empty department filter to none.
    pub fn validate(&self) -> Result<(PayPeriod, Option<&str>), ApiError> {
        let period = parse_period(&self.period)?;
        let department_id = self
            .department_id
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        Ok((period, department_id))
    }
}

fn parse_period(value: &str) -> Result<PayPeriod, ApiError> {
    value.parse::<PayPeriod>().map_err(|err| {
        ApiError::with_details(
            "INVALID_PERIOD",
            err.to_string(),
            "Periods are written as YYYY-MM, e.g. 2026-01",
        )
    })
}
