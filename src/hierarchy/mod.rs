//! Hierarchy resolution over the stored reporting graph.
//!
//! Resolution runs in two phases: [`OrgGraph::load`] fetches every
//! reachable employee once, then [`project_tree`] expands the graph into a
//! nested tree, bounded by [`HierarchyLimits`](crate::config::HierarchyLimits).
//! Counting works on either representation.

mod graph;
mod report_count;
mod resolver;

pub use graph::{DanglingReference, NodeFetch, OrgGraph};
pub use report_count::{count_distinct_reports, count_distinct_reports_in_graph};
pub use resolver::{
    CycleCut, HierarchyResolution, LimitCut, ResolutionLimit, project_tree, resolve_hierarchy,
};
