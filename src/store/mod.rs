//! Storage collaborator interface.
//!
//! The engine never owns persistence. Everything it needs is read through
//! the [`PayrollStore`] trait: read-only lookups that return the entity,
//! `None` for an explicit absence, or an [`EngineError::Storage`] when the
//! backing store itself fails.
//!
//! [`InMemoryStore`] is the bundled implementation, populated
//! programmatically or from YAML by [`crate::config::DatasetLoader`].
//!
//! [`EngineError::Storage`]: crate::error::EngineError::Storage

mod memory;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AttendanceExceptionType, AttendanceRecord, Employee, SalaryGroup, SalaryItem};

pub use memory::InMemoryStore;

/// Read-only lookups the calculation engine consumes.
///
/// Implementations must be safe to share across the concurrent batch runner.
pub trait PayrollStore: Send + Sync {
    /// Looks up an employee record.
    fn get_employee(&self, employee_id: &str) -> EngineResult<Option<Employee>>;

    /// Lists active employee ids, optionally restricted to one department.
    fn list_employee_ids(&self, department_id: Option<&str>) -> EngineResult<Vec<String>>;

    /// Looks up a salary group by id.
    fn get_salary_group(&self, group_id: &str) -> EngineResult<Option<SalaryGroup>>;

    /// Looks up a salary item by id.
    fn get_salary_item(&self, item_id: &str) -> EngineResult<Option<SalaryItem>>;

    /// The group id assigned directly to the employee.
    fn get_employee_assignment(&self, employee_id: &str) -> EngineResult<Option<String>>;

    /// The group id assigned to the department.
    fn get_department_assignment(&self, department_id: &str) -> EngineResult<Option<String>>;

    /// The group id assigned to the position.
    fn get_position_assignment(&self, position_id: &str) -> EngineResult<Option<String>>;

    /// Attendance rows for the employee dated within `[start, end]`.
    fn get_attendance_records(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Looks up an attendance exception type.
    fn get_exception_type(
        &self,
        exception_type_id: &str,
    ) -> EngineResult<Option<AttendanceExceptionType>>;

    /// The base salary recorded on the employee.
    fn get_employee_base_salary(&self, employee_id: &str) -> EngineResult<Option<Decimal>>;
}
