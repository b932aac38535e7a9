//! Graph validity rules.
//!
//! A snapshot is a valid DAG for this tool when it is non-trivial (at least
//! two nodes), fully connected (no node without an incident edge), and
//! acyclic. The predicate is a derived view: it is recomputed from the
//! snapshot on every call and never cached.
//!
//! Edges with an unresolved endpoint follow the policy documented on
//! [`crate::graph`]: they are treated as absent, both for adjacency and for
//! the isolation rule.

use log::debug;

use crate::{
    graph::GraphModel,
    snapshot::{Edge, Node},
};

/// Checks whether the snapshot satisfies the tool's DAG-validity rules.
///
/// Rules are evaluated in order and the first failing rule decides:
///
/// 1. fewer than two nodes — a graph needs at least two nodes to express a
///    dependency, so the empty graph is invalid as well;
/// 2. a node with no incident edge;
/// 3. a directed cycle.
///
/// Pure and total: no snapshot shape makes this panic.
pub fn validate_dag(nodes: &[Node], edges: &[Edge]) -> bool {
    if nodes.len() < 2 {
        debug!(nodes_len = nodes.len(); "Graph too small to express a dependency");
        return false;
    }

    let model = GraphModel::from_elements(nodes, edges);

    if let Some(isolated) = (0..model.node_count()).find(|&node| model.is_isolated(node)) {
        debug!(node_id = nodes[isolated].id; "Node has no incident edges");
        return false;
    }

    let adjacency = model.adjacency();
    let traversal = model.traverse(&adjacency);
    if traversal.has_cycle() {
        debug!(back_edges = traversal.back_edges.len(); "Graph contains cycles");
        return false;
    }

    true
}
