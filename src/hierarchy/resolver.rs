//! Tree projection of the reporting graph.
//!
//! A loaded [`OrgGraph`] is expanded depth-first into a nested
//! [`ResolvedEmployee`]. An employee reachable through two managers is
//! embedded under both. An ID that reappears on its own ancestor path is
//! emitted once more as a leaf with empty reports and expansion stops
//! there, so the output is always finite.
//!
//! Expansion uses an explicit stack of open managers rather than the call
//! stack. [`HierarchyLimits`] bound how deep and how large the projected
//! tree may grow; a report past either bound becomes an empty-reports leaf
//! and is recorded as a [`LimitCut`].

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::HierarchyLimits;
use crate::error::EngineResult;
use crate::models::{Employee, EmployeeId, ResolvedEmployee};
use crate::store::EmployeeStore;

use super::graph::{DanglingReference, OrgGraph};

/// A back-edge that was cut while projecting the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleCut {
    /// The employee whose report list closes the cycle.
    pub manager: EmployeeId,
    /// The report already present on the ancestor path.
    pub report: EmployeeId,
}

/// Which projection bound stopped an expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionLimit {
    /// The report sits deeper than `max_depth`.
    Depth,
    /// The tree already holds `max_nodes` nodes.
    Nodes,
}

/// A report that was emitted without its own reports because a
/// projection bound was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitCut {
    /// The manager listing the report.
    pub manager: EmployeeId,
    /// The report left unexpanded.
    pub report: EmployeeId,
    /// The bound that was reached.
    pub limit: ResolutionLimit,
}

/// Result of resolving an employee's hierarchy.
#[derive(Debug, Clone)]
pub struct HierarchyResolution {
    /// The resolved tree.
    pub tree: ResolvedEmployee,
    /// References skipped because the target does not exist.
    pub dangling: Vec<DanglingReference>,
    /// Cycles cut during projection.
    pub cycle_cuts: Vec<CycleCut>,
    /// Reports left unexpanded by a projection bound.
    pub limit_cuts: Vec<LimitCut>,
}

/// Loads the graph under `root` and projects it into a tree.
///
/// Fails with `EmployeeNotFound` when the root is missing; every other
/// data defect (dangling reports, cycles) is tolerated and logged.
pub fn resolve_hierarchy(
    store: &dyn EmployeeStore,
    root: &EmployeeId,
    limits: HierarchyLimits,
) -> EngineResult<HierarchyResolution> {
    let graph = OrgGraph::load(store, root)?;
    Ok(project_tree(&graph, limits))
}

/// Projects an already loaded graph into a tree.
pub fn project_tree(graph: &OrgGraph, limits: HierarchyLimits) -> HierarchyResolution {
    let mut projection = Projection::new(graph, limits);
    let tree = projection.run();

    if !projection.limit_cuts.is_empty() {
        warn!(
            root = %graph.root().employee_id,
            cuts = projection.limit_cuts.len(),
            nodes = projection.emitted,
            max_depth = limits.max_depth,
            max_nodes = limits.max_nodes,
            "Reporting tree truncated at projection limit"
        );
    }
    debug!(
        root = %graph.root().employee_id,
        dangling = graph.dangling().len(),
        cycle_cuts = projection.cycle_cuts.len(),
        nodes = projection.emitted,
        "Projected reporting tree"
    );

    HierarchyResolution {
        tree,
        dangling: graph.dangling().to_vec(),
        cycle_cuts: projection.cycle_cuts,
        limit_cuts: projection.limit_cuts,
    }
}

/// A manager whose report list is being expanded.
struct Frame<'g> {
    employee: &'g Employee,
    report_ids: &'g [EmployeeId],
    next: usize,
    reports: Vec<ResolvedEmployee>,
}

impl<'g> Frame<'g> {
    fn open(employee: &'g Employee, report_ids: &'g [EmployeeId]) -> Self {
        Self {
            employee,
            report_ids,
            next: 0,
            reports: Vec::with_capacity(report_ids.len()),
        }
    }

    fn next_report(&mut self) -> Option<&'g EmployeeId> {
        let id = self.report_ids.get(self.next)?;
        self.next += 1;
        Some(id)
    }
}

struct Projection<'g> {
    graph: &'g OrgGraph,
    max_depth: usize,
    max_nodes: usize,
    emitted: usize,
    cycle_cuts: Vec<CycleCut>,
    limit_cuts: Vec<LimitCut>,
}

impl<'g> Projection<'g> {
    fn new(graph: &'g OrgGraph, limits: HierarchyLimits) -> Self {
        Self {
            graph,
            max_depth: limits.max_depth.max(1),
            max_nodes: limits.max_nodes.max(1),
            emitted: 0,
            cycle_cuts: Vec::new(),
            limit_cuts: Vec::new(),
        }
    }

    fn leaf(
        &mut self,
        employee: &Employee,
        reports: Option<Vec<ResolvedEmployee>>,
    ) -> ResolvedEmployee {
        self.emitted += 1;
        ResolvedEmployee::from_record(employee, reports)
    }

    fn run(&mut self) -> ResolvedEmployee {
        let graph = self.graph;
        let root = graph.root();
        let Some(root_ids) = root.direct_reports.as_deref() else {
            return self.leaf(root, None);
        };

        self.emitted += 1;
        let mut path: HashSet<&'g EmployeeId> = HashSet::from([&root.employee_id]);
        let mut stack = vec![Frame::open(root, root_ids)];

        loop {
            let depth = stack.len();
            let Some(frame) = stack.last_mut() else {
                // The root frame returns when it is popped.
                return ResolvedEmployee::from_record(root, Some(Vec::new()));
            };

            let Some(report_id) = frame.next_report() else {
                let Some(done) = stack.pop() else { continue };
                path.remove(&done.employee.employee_id);
                let node = ResolvedEmployee::from_record(done.employee, Some(done.reports));
                match stack.last_mut() {
                    Some(parent) => parent.reports.push(node),
                    None => return node,
                }
                continue;
            };
            let manager = frame.employee;

            // Dangling references were already logged by the loader.
            let Some(report) = graph.employee(report_id) else {
                continue;
            };

            let Some(report_ids) = report.direct_reports.as_deref() else {
                let node = self.leaf(report, None);
                frame.reports.push(node);
                continue;
            };

            if path.contains(report_id) {
                warn!(
                    manager = %manager.employee_id,
                    report = %report_id,
                    "Reporting cycle detected, truncating"
                );
                self.cycle_cuts.push(CycleCut {
                    manager: manager.employee_id.clone(),
                    report: report_id.clone(),
                });
                let node = self.leaf(report, Some(Vec::new()));
                frame.reports.push(node);
                continue;
            }

            let limit = if depth >= self.max_depth {
                Some(ResolutionLimit::Depth)
            } else if self.emitted >= self.max_nodes {
                Some(ResolutionLimit::Nodes)
            } else {
                None
            };

            if let Some(limit) = limit {
                if report_ids.iter().any(|id| graph.employee(id).is_some()) {
                    debug!(
                        manager = %manager.employee_id,
                        report = %report_id,
                        ?limit,
                        "Report left unexpanded"
                    );
                    self.limit_cuts.push(LimitCut {
                        manager: manager.employee_id.clone(),
                        report: report_id.clone(),
                        limit,
                    });
                }
                let node = self.leaf(report, Some(Vec::new()));
                frame.reports.push(node);
                continue;
            }

            self.emitted += 1;
            path.insert(report_id);
            stack.push(Frame::open(report, report_ids));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::NewEmployee;
    use crate::store::InMemoryEmployeeStore;

    fn employee(id: &str, reports: Option<&[&str]>) -> Employee {
        let fields = NewEmployee::validate(
            Some(id.to_string()),
            Some("Last".to_string()),
            Some("Developer".to_string()),
            Some("Engineering".to_string()),
            reports.map(|r| r.iter().map(|s| EmployeeId::from(*s)).collect()),
        )
        .unwrap();
        Employee::new(EmployeeId::from(id), fields)
    }

    fn resolve(store: &InMemoryEmployeeStore, root: &str) -> HierarchyResolution {
        resolve_with(store, root, HierarchyLimits::default())
    }

    fn resolve_with(
        store: &InMemoryEmployeeStore,
        root: &str,
        limits: HierarchyLimits,
    ) -> HierarchyResolution {
        resolve_hierarchy(store, &EmployeeId::from(root), limits).unwrap()
    }

    /// `e0 -> e1 -> ... -> e{len-1}`, the last one without reports.
    fn chain(len: usize) -> InMemoryEmployeeStore {
        InMemoryEmployeeStore::with_records((0..len).map(|i| {
            let next = format!("e{}", i + 1);
            let reports = (i + 1 < len).then(|| vec![next.as_str()]);
            employee(&format!("e{i}"), reports.as_deref())
        }))
    }

    /// Depth of the deepest node and the number of nodes, without recursion.
    fn shape(tree: &ResolvedEmployee) -> (usize, usize) {
        let mut stack = vec![(tree, 0)];
        let (mut depth, mut nodes) = (0, 0);
        while let Some((node, level)) = stack.pop() {
            depth = depth.max(level);
            nodes += 1;
            stack.extend(node.reports().map(|r| (r, level + 1)));
        }
        (depth, nodes)
    }

    fn ids(employees: &[ResolvedEmployee]) -> Vec<&str> {
        employees.iter().map(|e| e.employee_id.as_str()).collect()
    }

    #[test]
    fn test_leaf_keeps_absent_reports() {
        let store = InMemoryEmployeeStore::with_records([employee("ringo", None)]);
        let resolution = resolve(&store, "ringo");
        assert_eq!(resolution.tree.direct_reports, None);
        assert_eq!(resolution.tree.first_name, "ringo");
    }

    #[test]
    fn test_leaf_keeps_empty_reports() {
        let store = InMemoryEmployeeStore::with_records([employee("ringo", Some(&[]))]);
        let resolution = resolve(&store, "ringo");
        assert_eq!(resolution.tree.direct_reports, Some(vec![]));
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let store = InMemoryEmployeeStore::new();
        let result =
            resolve_hierarchy(&store, &EmployeeId::from("ghost"), HierarchyLimits::default());
        assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
    }

    #[test]
    fn test_nested_reports_preserve_order() {
        let store = InMemoryEmployeeStore::with_records([
            employee("john", Some(&["paul", "ringo"])),
            employee("paul", None),
            employee("ringo", Some(&["pete", "george"])),
            employee("pete", None),
            employee("george", None),
        ]);

        let tree = resolve(&store, "john").tree;
        let reports = tree.direct_reports.as_deref().unwrap();
        assert_eq!(ids(reports), vec!["paul", "ringo"]);
        assert_eq!(
            ids(reports[1].direct_reports.as_deref().unwrap()),
            vec!["pete", "george"]
        );
    }

    #[test]
    fn test_dangling_reports_are_skipped() {
        let store = InMemoryEmployeeStore::with_records([
            employee("a", Some(&["gone", "b"])),
            employee("b", None),
        ]);

        let resolution = resolve(&store, "a");
        assert_eq!(ids(resolution.tree.direct_reports.as_deref().unwrap()), vec!["b"]);
        assert_eq!(resolution.dangling.len(), 1);
        assert_eq!(resolution.dangling[0].missing.as_str(), "gone");
    }

    #[test]
    fn test_only_dangling_reports_yield_empty_list() {
        let store = InMemoryEmployeeStore::with_records([employee("a", Some(&["gone"]))]);
        let resolution = resolve(&store, "a");
        assert_eq!(resolution.tree.direct_reports, Some(vec![]));
    }

    #[test]
    fn test_shared_report_is_embedded_under_each_manager() {
        let store = InMemoryEmployeeStore::with_records([
            employee("a", Some(&["b", "c"])),
            employee("b", Some(&["d"])),
            employee("c", Some(&["d"])),
            employee("d", None),
        ]);

        let resolution = resolve(&store, "a");
        let reports = resolution.tree.direct_reports.as_deref().unwrap();
        for manager in reports {
            assert_eq!(ids(manager.direct_reports.as_deref().unwrap()), vec!["d"]);
        }
        assert!(resolution.cycle_cuts.is_empty());
    }

    #[test]
    fn test_two_node_cycle_is_cut() {
        let store = InMemoryEmployeeStore::with_records([
            employee("a", Some(&["b"])),
            employee("b", Some(&["a"])),
        ]);

        let resolution = resolve(&store, "a");
        let b = &resolution.tree.direct_reports.as_deref().unwrap()[0];
        let a_again = &b.direct_reports.as_deref().unwrap()[0];
        assert_eq!(a_again.employee_id.as_str(), "a");
        assert_eq!(a_again.direct_reports, Some(vec![]));
        assert_eq!(
            resolution.cycle_cuts,
            vec![CycleCut {
                manager: EmployeeId::from("b"),
                report: EmployeeId::from("a"),
            }]
        );
    }

    #[test]
    fn test_self_report_is_cut() {
        let store = InMemoryEmployeeStore::with_records([employee("a", Some(&["a"]))]);

        let resolution = resolve(&store, "a");
        let reports = resolution.tree.direct_reports.as_deref().unwrap();
        assert_eq!(ids(reports), vec!["a"]);
        assert_eq!(reports[0].direct_reports, Some(vec![]));
        assert_eq!(resolution.cycle_cuts.len(), 1);
    }

    #[test]
    fn test_cycle_below_root_is_cut() {
        // root -> a -> b -> c -> a
        let store = InMemoryEmployeeStore::with_records([
            employee("root", Some(&["a"])),
            employee("a", Some(&["b"])),
            employee("b", Some(&["c"])),
            employee("c", Some(&["a"])),
        ]);

        let resolution = resolve(&store, "root");
        assert_eq!(
            resolution.cycle_cuts,
            vec![CycleCut {
                manager: EmployeeId::from("c"),
                report: EmployeeId::from("a"),
            }]
        );
    }

    #[test]
    fn test_chain_deeper_than_limit_is_cut() {
        let store = chain(10);
        let limits = HierarchyLimits {
            max_depth: 3,
            ..HierarchyLimits::default()
        };

        let resolution = resolve_with(&store, "e0", limits);
        assert_eq!(shape(&resolution.tree), (3, 4));
        assert_eq!(
            resolution.limit_cuts,
            vec![LimitCut {
                manager: EmployeeId::from("e2"),
                report: EmployeeId::from("e3"),
                limit: ResolutionLimit::Depth,
            }]
        );

        let e3 = &resolution.tree.direct_reports.as_deref().unwrap()[0]
            .direct_reports
            .as_deref()
            .unwrap()[0]
            .direct_reports
            .as_deref()
            .unwrap()[0];
        assert_eq!(e3.employee_id.as_str(), "e3");
        assert_eq!(e3.direct_reports, Some(vec![]));
    }

    #[test]
    fn test_leaf_at_depth_limit_is_not_a_cut() {
        let store = chain(4);
        let limits = HierarchyLimits {
            max_depth: 3,
            ..HierarchyLimits::default()
        };

        let resolution = resolve_with(&store, "e0", limits);
        assert_eq!(shape(&resolution.tree), (3, 4));
        assert!(resolution.limit_cuts.is_empty());
    }

    #[test]
    fn test_very_deep_chain_resolves_serializes_and_drops() {
        let len = 100_000;
        let store = chain(len);
        let root = EmployeeId::from("e0");

        let graph = OrgGraph::load(&store, &root).unwrap();
        assert_eq!(
            crate::hierarchy::count_distinct_reports_in_graph(&graph),
            len - 1
        );

        let resolution = project_tree(&graph, HierarchyLimits::default());
        let max_depth = HierarchyLimits::default().max_depth;
        assert_eq!(shape(&resolution.tree).0, max_depth);
        assert_eq!(resolution.limit_cuts.len(), 1);
        assert_eq!(resolution.limit_cuts[0].limit, ResolutionLimit::Depth);

        let json = serde_json::to_string(&resolution.tree).unwrap();
        assert!(json.starts_with(r#"{"employeeId":"e0""#));
        drop(resolution);
    }

    #[test]
    fn test_layered_shared_reports_stop_at_node_budget() {
        // 22 layers of two employees, each listing both employees of the
        // next layer: 44 records, about 2^22 paths.
        let layers = 22;
        let id = |layer: usize, n: usize| format!("l{layer}-{n}");
        let store = InMemoryEmployeeStore::with_records((0..layers).flat_map(|layer| {
            let next = [id(layer + 1, 0), id(layer + 1, 1)];
            (0..2).map(move |n| {
                let reports: Vec<&str> = next.iter().map(String::as_str).collect();
                let reports = (layer + 1 < layers).then_some(reports.as_slice());
                employee(&id(layer, n), reports)
            })
        }));
        let limits = HierarchyLimits {
            max_depth: 64,
            max_nodes: 1_000,
        };

        let resolution = resolve_with(&store, "l0-0", limits);
        let (_, nodes) = shape(&resolution.tree);
        assert!(nodes < 1_100, "tree has {nodes} nodes");
        assert!(!resolution.limit_cuts.is_empty());
        assert!(
            resolution
                .limit_cuts
                .iter()
                .all(|cut| cut.limit == ResolutionLimit::Nodes)
        );
        assert!(resolution.cycle_cuts.is_empty());
    }
}
