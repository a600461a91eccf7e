//! Configuration loading functionality.
//!
//! This module provides [`ConfigLoader`] for the engine settings file and
//! [`DatasetLoader`] for building an [`InMemoryStore`] from a directory of
//! YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::store::InMemoryStore;

use super::types::{
    AssignmentsFile, AttendanceFile, EmployeesFile, EngineSettings, ExceptionTypesFile,
    SalaryGroupsFile, SalaryItemsFile,
};

/// Loads and validates engine settings.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let settings = ConfigLoader::load_settings("./config/engine.yaml")?;
/// println!("Working days: {}", settings.calculation.standard_working_days);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads settings from a YAML file and validates them.
    pub fn load_settings<P: AsRef<Path>>(path: P) -> EngineResult<EngineSettings> {
        let settings: EngineSettings = load_yaml(path.as_ref())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parses settings from YAML text and validates them.
    pub fn parse_settings(yaml: &str) -> EngineResult<EngineSettings> {
        let settings: EngineSettings =
            serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Loads a payroll dataset directory into an [`InMemoryStore`].
///
/// # Directory Structure
///
/// ```text
/// config/dataset/
/// ├── employees.yaml
/// ├── salary_items.yaml
/// ├── salary_groups.yaml
/// ├── assignments.yaml        # optional
/// ├── exception_types.yaml
/// └── attendance.yaml         # optional
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DatasetLoader;

impl DatasetLoader {
    /// Loads every dataset file in `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<InMemoryStore> {
        let path = path.as_ref();

        let employees: EmployeesFile = load_yaml(&path.join("employees.yaml"))?;
        let items: SalaryItemsFile = load_yaml(&path.join("salary_items.yaml"))?;
        let groups: SalaryGroupsFile = load_yaml(&path.join("salary_groups.yaml"))?;
        let exception_types: ExceptionTypesFile = load_yaml(&path.join("exception_types.yaml"))?;
        let assignments: AssignmentsFile = load_optional_yaml(&path.join("assignments.yaml"))?;
        let attendance: AttendanceFile = load_optional_yaml(&path.join("attendance.yaml"))?;

        let mut store = InMemoryStore::new();
        for employee in employees.employees {
            store.insert_employee(employee);
        }
        for item in items.salary_items {
            store.insert_salary_item(item);
        }
        for group in groups.salary_groups {
            store.insert_salary_group(group);
        }
        for exception_type in exception_types.exception_types {
            store.insert_exception_type(exception_type);
        }
        for (employee_id, group_id) in assignments.employees {
            store.assign_to_employee(employee_id, group_id);
        }
        for (department_id, group_id) in assignments.departments {
            store.assign_to_department(department_id, group_id);
        }
        for (position_id, group_id) in assignments.positions {
            store.assign_to_position(position_id, group_id);
        }
        let record_count = attendance.records.len();
        for record in attendance.records {
            store.insert_attendance_record(record);
        }

        info!(
            path = %path.display(),
            employees = store.employee_count(),
            attendance_records = record_count,
            "Loaded payroll dataset"
        );

        Ok(store)
    }
}

/// Loads and parses a YAML file.
fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}

/// Like [`load_yaml`], but a missing file yields the default value.
fn load_optional_yaml<T: serde::de::DeserializeOwned + Default>(path: &Path) -> EngineResult<T> {
    if path.exists() {
        load_yaml(path)
    } else {
        Ok(T::default())
    }
}
