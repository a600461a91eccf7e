//! Configuration loading for the payroll engine.
//!
//! This module loads engine settings (calculation policy, batch concurrency,
//! server address) and payroll datasets from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::{ConfigLoader, DatasetLoader};
//!
//! let settings = ConfigLoader::load_settings("./config/engine.yaml").unwrap();
//! let store = DatasetLoader::load("./config/dataset").unwrap();
//! println!("Loaded {} employees", store.employee_count());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, DatasetLoader};
pub use types::{
    AssignmentsFile, AttendanceFile, BatchSettings, CalculationSettings, EmployeesFile,
    EngineSettings, ExceptionTypesFile, SalaryGroupsFile, SalaryItemsFile, ServerSettings,
};
