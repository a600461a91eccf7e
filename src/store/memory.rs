//! In-memory implementation of [`PayrollStore`].

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AttendanceExceptionType, AttendanceRecord, Employee, SalaryGroup, SalaryItem};

use super::PayrollStore;

/// A [`PayrollStore`] held entirely in memory.
///
/// Lookups never fail. Referential integrity is not checked on
/// insert: an assignment may point at a group that does not exist, and the
/// engine reports it when the affected employee is calculated.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Employee;
/// use payroll_engine::store::{InMemoryStore, PayrollStore};
/// use rust_decimal::Decimal;
///
/// let mut store = InMemoryStore::new();
/// store.insert_employee(Employee {
///     id: "emp_001".to_string(),
///     name: "Li Wei".to_string(),
///     department_id: Some("dept_ops".to_string()),
///     position_id: None,
///     base_salary: Decimal::new(3000, 0),
///     active: true,
/// });
///
/// let ids = store.list_employee_ids(Some("dept_ops")).unwrap();
/// assert_eq!(ids, vec!["emp_001".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    employees: BTreeMap<String, Employee>,
    salary_items: HashMap<String, SalaryItem>,
    salary_groups: HashMap<String, SalaryGroup>,
    employee_assignments: HashMap<String, String>,
    department_assignments: HashMap<String, String>,
    position_assignments: HashMap<String, String>,
    exception_types: HashMap<String, AttendanceExceptionType>,
    attendance: HashMap<String, Vec<AttendanceRecord>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an employee.
    pub fn insert_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Inserts or replaces a salary item.
    pub fn insert_salary_item(&mut self, item: SalaryItem) {
        self.salary_items.insert(item.id.clone(), item);
    }

    /// Inserts or replaces a salary group.
    pub fn insert_salary_group(&mut self, group: SalaryGroup) {
        self.salary_groups.insert(group.id.clone(), group);
    }

    /// Assigns a group directly to an employee.
    pub fn assign_to_employee(
        &mut self,
        employee_id: impl Into<String>,
        group_id: impl Into<String>,
    ) {
        self.employee_assignments
            .insert(employee_id.into(), group_id.into());
    }

    /// Assigns a group to a department.
    pub fn assign_to_department(
        &mut self,
        department_id: impl Into<String>,
        group_id: impl Into<String>,
    ) {
        self.department_assignments
            .insert(department_id.into(), group_id.into());
    }

    /// Assigns a group to a position.
    pub fn assign_to_position(
        &mut self,
        position_id: impl Into<String>,
        group_id: impl Into<String>,
    ) {
        self.position_assignments
            .insert(position_id.into(), group_id.into());
    }

    /// Inserts or replaces an attendance exception type.
    pub fn insert_exception_type(&mut self, exception_type: AttendanceExceptionType) {
        self.exception_types
            .insert(exception_type.id.clone(), exception_type);
    }

    /// Appends an attendance record.
    pub fn insert_attendance_record(&mut self, record: AttendanceRecord) {
        self.attendance
            .entry(record.employee_id.clone())
            .or_default()
            .push(record);
    }

    /// Replaces all attendance records of an employee (re-import).
    pub fn replace_attendance(&mut self, employee_id: &str, records: Vec<AttendanceRecord>) {
        self.attendance.insert(employee_id.to_string(), records);
    }

    /// Number of employees held.
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }
}

impl PayrollStore for InMemoryStore {
    fn get_employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.employees.get(employee_id).cloned())
    }

    fn list_employee_ids(&self, department_id: Option<&str>) -> EngineResult<Vec<String>> {
        Ok(self
            .employees
            .values()
            .filter(|e| e.active)
            .filter(|e| match department_id {
                Some(dept) => e.department_id.as_deref() == Some(dept),
                None => true,
            })
            .map(|e| e.id.clone())
            .collect())
    }

    fn get_salary_group(&self, group_id: &str) -> EngineResult<Option<SalaryGroup>> {
        Ok(self.salary_groups.get(group_id).cloned())
    }

    fn get_salary_item(&self, item_id: &str) -> EngineResult<Option<SalaryItem>> {
        Ok(self.salary_items.get(item_id).cloned())
    }

    fn get_employee_assignment(&self, employee_id: &str) -> EngineResult<Option<String>> {
        Ok(self.employee_assignments.get(employee_id).cloned())
    }

    fn get_department_assignment(&self, department_id: &str) -> EngineResult<Option<String>> {
        Ok(self.department_assignments.get(department_id).cloned())
    }

    fn get_position_assignment(&self, position_id: &str) -> EngineResult<Option<String>> {
        Ok(self.position_assignments.get(position_id).cloned())
    }

    fn get_attendance_records(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let mut records: Vec<AttendanceRecord> = self
            .attendance
            .get(employee_id)
            .map(|rows| {
                rows.iter()
                    .filter(|r| r.record_date >= start && r.record_date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        records.sort_by_key(|r| r.record_date);
        Ok(records)
    }

    fn get_exception_type(
        &self,
        exception_type_id: &str,
    ) -> EngineResult<Option<AttendanceExceptionType>> {
        Ok(self.exception_types.get(exception_type_id).cloned())
    }

    fn get_employee_base_salary(&self, employee_id: &str) -> EngineResult<Option<Decimal>> {
        Ok(self.employees.get(employee_id).map(|e| e.base_salary))
    }
}
