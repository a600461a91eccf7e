//! Salary group resolution.
//!
//! This module determines which salary group applies to an employee by
//! trying the employee, department and position assignments in that order,
//! then loads the group's items in declared order.

use crate::error::{EngineError, EngineResult};
use crate::models::{AssignmentLevel, SalaryGroup, SalaryItem};
use crate::store::PayrollStore;

/// A salary group together with its items, ready for composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSalaryGroup {
    /// The group record.
    pub group: SalaryGroup,
    /// The assignment level that supplied the group.
    pub source: AssignmentLevel,
    /// The group's items in declared order.
    pub items: Vec<SalaryItem>,
}

/// Resolves the salary group that applies to an employee.
///
/// Assignments are tried in precedence order and the first one present wins:
/// 1. the employee's own assignment
/// 2. the department assignment (if the employee has a department)
/// 3. the position assignment (if the employee has a position)
///
/// Returns `Ok(None)` when no level has an assignment; the employee is then
/// paid base salary only. An assignment pointing at a group or item that is
/// not in the catalog is a data-integrity error, never silently skipped.
///
/// # Errors
///
/// - [`EngineError::SalaryGroupNotFound`] if the winning assignment is dangling
/// - [`EngineError::SalaryItemNotFound`] if the group lists an unknown item
/// - any storage error from the lookups
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_salary_group;
/// use payroll_engine::models::{AssignmentLevel, SalaryGroup};
/// use payroll_engine::store::InMemoryStore;
///
/// let mut store = InMemoryStore::new();
/// store.insert_salary_group(SalaryGroup {
///     id: "grp_ops".to_string(),
///     name: "Operations".to_string(),
///     items: vec![],
/// });
/// store.assign_to_department("dept_ops", "grp_ops");
///
/// let resolved = resolve_salary_group(&store, "emp_001", Some("dept_ops"), None)
///     .unwrap()
///     .unwrap();
/// assert_eq!(resolved.group.id, "grp_ops");
/// assert_eq!(resolved.source, AssignmentLevel::Department);
/// ```
pub fn resolve_salary_group(
    store: &dyn PayrollStore,
    employee_id: &str,
    department_id: Option<&str>,
    position_id: Option<&str>,
) -> EngineResult<Option<ResolvedSalaryGroup>> {
    let lookups = [
        (AssignmentLevel::Employee, Some(employee_id)),
        (AssignmentLevel::Department, department_id),
        (AssignmentLevel::Position, position_id),
    ];

    for (level, key) in lookups {
        let Some(key) = key else {
            continue;
        };
        if let Some(group_id) = lookup_assignment(store, level, key)? {
            return load_group(store, &group_id, level, key).map(Some);
        }
    }

    Ok(None)
}

fn lookup_assignment(
    store: &dyn PayrollStore,
    level: AssignmentLevel,
    key: &str,
) -> EngineResult<Option<String>> {
    match level {
        AssignmentLevel::Employee => store.get_employee_assignment(key),
        AssignmentLevel::Department => store.get_department_assignment(key),
        AssignmentLevel::Position => store.get_position_assignment(key),
    }
}

fn load_group(
    store: &dyn PayrollStore,
    group_id: &str,
    source: AssignmentLevel,
    key: &str,
) -> EngineResult<ResolvedSalaryGroup> {
    let group = store
        .get_salary_group(group_id)?
        .ok_or_else(|| EngineError::SalaryGroupNotFound {
            group_id: group_id.to_string(),
            referenced_by: format!("{} '{}'", source.as_str(), key),
        })?;

    let items = group
        .items
        .iter()
        .map(|item_id| {
            store
                .get_salary_item(item_id)?
                .ok_or_else(|| EngineError::SalaryItemNotFound {
                    item_id: item_id.clone(),
                    group_id: group.id.clone(),
                })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(ResolvedSalaryGroup {
        group,
        source,
        items,
    })
}
