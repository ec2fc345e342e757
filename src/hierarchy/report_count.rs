//! Distinct descendant counting.
//!
//! The count is the number of distinct employee IDs reachable below the
//! root. The root never counts itself, even when a cycle leads back to it,
//! and an employee reachable along several paths counts once.

use std::collections::HashSet;

use crate::models::{EmployeeId, ResolvedEmployee};

use super::graph::OrgGraph;

/// Counts the distinct employees below the root of a resolved tree.
pub fn count_distinct_reports(root: &ResolvedEmployee) -> usize {
    let mut visited: HashSet<&EmployeeId> = HashSet::from([&root.employee_id]);
    let mut stack: Vec<&ResolvedEmployee> = root.reports().collect();
    let mut count = 0;

    while let Some(node) = stack.pop() {
        if !visited.insert(&node.employee_id) {
            continue;
        }
        count += 1;
        stack.extend(node.reports());
    }

    count
}

/// Counts the distinct employees below the root of a loaded graph.
///
/// Agrees with [`count_distinct_reports`] on the tree projected from the
/// same graph unless projection hit a limit. Dangling references are not
/// counted.
pub fn count_distinct_reports_in_graph(graph: &OrgGraph) -> usize {
    let root = graph.root();
    let mut visited: HashSet<&EmployeeId> = HashSet::from([&root.employee_id]);
    let mut stack: Vec<&EmployeeId> = root.report_ids().collect();
    let mut count = 0;

    while let Some(id) = stack.pop() {
        let Some(employee) = graph.employee(id) else {
            continue;
        };
        if !visited.insert(id) {
            continue;
        }
        count += 1;
        stack.extend(employee.report_ids());
    }

    count
}
