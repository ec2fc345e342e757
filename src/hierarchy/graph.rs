//! Reporting graph loading.
//!
//! The stored relation is a general directed graph: an employee may be
//! listed under two managers, and malformed data may contain cycles. This
//! module loads the part of the graph reachable from one employee into an
//! arena keyed by ID, fetching every distinct ID from the store once.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeId};
use crate::store::EmployeeStore;

/// Outcome of fetching a single node while loading the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeFetch {
    /// The referenced employee exists.
    Found(Employee),
    /// The referenced ID has no stored record.
    Dangling,
}

/// A `directReports` entry that does not resolve to a stored employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// The employee whose report list holds the reference.
    pub manager: EmployeeId,
    /// The ID that could not be found.
    pub missing: EmployeeId,
}

/// The reporting graph reachable from a root employee.
///
/// Nodes are stored once per ID; edges are the stored `direct_reports`
/// lists. The graph is read-only once loaded.
#[derive(Debug, Clone)]
pub struct OrgGraph {
    root: Employee,
    nodes: HashMap<EmployeeId, NodeFetch>,
    dangling: Vec<DanglingReference>,
}

impl OrgGraph {
    /// Loads every employee reachable from `root` via `direct_reports`.
    ///
    /// Fails with [`EngineError::EmployeeNotFound`] only when the root
    /// itself is missing. Missing descendants are recorded as
    /// [`NodeFetch::Dangling`] and logged. Store failures propagate.
    pub fn load(store: &dyn EmployeeStore, root: &EmployeeId) -> EngineResult<Self> {
        let root_record = store
            .get_by_id(root)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: root.to_string(),
            })?;

        let mut nodes = HashMap::new();
        let mut dangling = Vec::new();
        let mut queue = VecDeque::from([root.clone()]);
        nodes.insert(root.clone(), NodeFetch::Found(root_record.clone()));

        while let Some(manager_id) = queue.pop_front() {
            let report_ids: Vec<EmployeeId> = match nodes.get(&manager_id) {
                Some(NodeFetch::Found(manager)) => manager.report_ids().cloned().collect(),
                _ => continue,
            };

            for report_id in report_ids {
                if let Some(fetched) = nodes.get(&report_id) {
                    if *fetched == NodeFetch::Dangling {
                        dangling.push(DanglingReference {
                            manager: manager_id.clone(),
                            missing: report_id,
                        });
                    }
                    continue;
                }

                match store.get_by_id(&report_id)? {
                    Some(report) => {
                        nodes.insert(report_id.clone(), NodeFetch::Found(report));
                        queue.push_back(report_id);
                    }
                    None => {
                        warn!(
                            manager = %manager_id,
                            missing = %report_id,
                            "Missing employee reference in reporting chain"
                        );
                        nodes.insert(report_id.clone(), NodeFetch::Dangling);
                        dangling.push(DanglingReference {
                            manager: manager_id.clone(),
                            missing: report_id,
                        });
                    }
                }
            }
        }

        debug!(root = %root, nodes = nodes.len(), "Loaded reporting graph");

        Ok(Self {
            root: root_record,
            nodes,
            dangling,
        })
    }

    /// The stored record of the employee the graph was loaded from.
    pub fn root(&self) -> &Employee {
        &self.root
    }

    /// Returns the fetch outcome for `id`, or `None` if it is unreachable.
    pub fn fetch(&self, id: &EmployeeId) -> Option<&NodeFetch> {
        self.nodes.get(id)
    }

    /// Returns the stored record for `id` when it was found.
    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        match self.nodes.get(id) {
            Some(NodeFetch::Found(employee)) => Some(employee),
            _ => None,
        }
    }

    /// Number of employees found, the root included.
    pub fn employee_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| matches!(n, NodeFetch::Found(_)))
            .count()
    }

    /// Every dangling reference met while loading, in discovery order.
    pub fn dangling(&self) -> &[DanglingReference] {
        &self.dangling
    }
}
