//! In-memory graph model shared by the validator and the layout engine.
//!
//! [`GraphModel`] resolves a snapshot's string node ids into a
//! [`petgraph::graph::DiGraph`] arena so the traversals can run over dense
//! indices. Edges whose source or target id does not resolve to a node are
//! dropped while the model is built and do not count as incident edges
//! anywhere downstream; self-loops are kept so the cycle search can report
//! them.

use indexmap::IndexMap;
use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::snapshot::{Edge, Node};

/// Arena-indexed view of one snapshot.
///
/// Arena index `i` corresponds to `nodes[i]` of the snapshot the model was
/// built from; node order is therefore insertion order.
pub(crate) struct GraphModel {
    graph: DiGraph<(), ()>,
}

impl GraphModel {
    /// Builds the model, resolving edge endpoints against the node ids.
    pub(crate) fn from_elements(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut graph = DiGraph::new();
        let mut id_map: IndexMap<&str, NodeIndex> = IndexMap::with_capacity(nodes.len());

        for node in nodes {
            let idx = graph.add_node(());
            // First occurrence wins if a duplicate id slips in.
            id_map.entry(node.id.as_str()).or_insert(idx);
        }

        let mut dropped = 0usize;
        for edge in edges {
            match (
                id_map.get(edge.source.as_str()),
                id_map.get(edge.target.as_str()),
            ) {
                (Some(&source), Some(&target)) => {
                    graph.add_edge(source, target, ());
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!(dropped; "Ignoring edges with unresolved endpoints");
        }

        Self { graph }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the node participates in no retained edge, in either direction.
    pub(crate) fn is_isolated(&self, node: usize) -> bool {
        self.graph
            .neighbors_undirected(NodeIndex::new(node))
            .next()
            .is_none()
    }

    /// Successor lists in edge insertion order, indexed by arena index.
    pub(crate) fn adjacency(&self) -> Vec<Vec<usize>> {
        self.graph
            .node_indices()
            .map(|idx| {
                // petgraph iterates neighbors in reverse insertion order.
                let mut successors: Vec<usize> =
                    self.graph.neighbors(idx).map(NodeIndex::index).collect();
                successors.reverse();
                successors
            })
            .collect()
    }

    /// Depth-first classification of the whole graph.
    ///
    /// Iterative three-color discipline with an explicit work stack: a white
    /// node is pushed and marked gray, a gray successor records a back edge,
    /// a node whose successors are exhausted turns black and enters the
    /// postorder. Black nodes are never re-explored. Starting points follow
    /// insertion order, so the classification is deterministic for a given
    /// snapshot.
    pub(crate) fn traverse(&self, adjacency: &[Vec<usize>]) -> Traversal {
        let node_count = adjacency.len();
        let mut marks = vec![Mark::White; node_count];
        let mut postorder = Vec::with_capacity(node_count);
        let mut back_edges = Vec::new();
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for start in 0..node_count {
            if marks[start] != Mark::White {
                continue;
            }
            marks[start] = Mark::Gray;
            stack.push((start, 0));

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                if let Some(&next) = adjacency[node].get(frame.1) {
                    frame.1 += 1;
                    match marks[next] {
                        Mark::White => {
                            marks[next] = Mark::Gray;
                            stack.push((next, 0));
                        }
                        Mark::Gray => back_edges.push((node, next)),
                        Mark::Black => {}
                    }
                } else {
                    marks[node] = Mark::Black;
                    postorder.push(node);
                    stack.pop();
                }
            }
        }

        Traversal {
            postorder,
            back_edges,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// Result of one depth-first classification pass.
pub(crate) struct Traversal {
    /// Nodes in the order they turned black. The reverse is a topological
    /// order of the graph with its back edges removed.
    pub(crate) postorder: Vec<usize>,

    /// Edges that closed a cycle during the traversal.
    pub(crate) back_edges: Vec<(usize, usize)>,
}

impl Traversal {
    pub(crate) fn has_cycle(&self) -> bool {
        !self.back_edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn node(id: &str) -> Node {
        Node::new(id, id.to_uppercase(), Point::default())
    }

    fn model_fixture(ids: &[&str], pairs: &[(&str, &str)]) -> (Vec<Node>, Vec<Edge>) {
        let nodes = ids.iter().map(|id| node(id)).collect();
        let edges = pairs
            .iter()
            .map(|&(source, target)| Edge::between(source, target))
            .collect();
        (nodes, edges)
    }

    #[test]
    fn test_dangling_edges_are_dropped() {
        let (nodes, edges) = model_fixture(&["a", "b"], &[("a", "b"), ("a", "ghost"), ("ghost", "b")]);
        let model = GraphModel::from_elements(&nodes, &edges);

        assert_eq!(model.adjacency(), vec![vec![1], vec![]]);
        assert!(!model.is_isolated(0));
        assert!(!model.is_isolated(1));
    }

    #[test]
    fn test_node_connected_only_by_dangling_edge_is_isolated() {
        let (nodes, edges) = model_fixture(&["a", "b"], &[("a", "ghost")]);
        let model = GraphModel::from_elements(&nodes, &edges);

        assert!(model.is_isolated(0));
        assert!(model.is_isolated(1));
    }

    #[test]
    fn test_adjacency_keeps_insertion_order() {
        let (nodes, edges) = model_fixture(&["a", "b", "c", "d"], &[("a", "c"), ("a", "b"), ("a", "d")]);
        let model = GraphModel::from_elements(&nodes, &edges);

        assert_eq!(model.adjacency()[0], vec![2, 1, 3]);
    }

    #[test]
    fn test_traverse_acyclic() {
        let (nodes, edges) = model_fixture(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let model = GraphModel::from_elements(&nodes, &edges);
        let adjacency = model.adjacency();
        let traversal = model.traverse(&adjacency);

        assert!(!traversal.has_cycle());
        assert_eq!(traversal.postorder, vec![2, 1, 0]);
    }

    #[test]
    fn test_traverse_reports_back_edge() {
        let (nodes, edges) = model_fixture(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let model = GraphModel::from_elements(&nodes, &edges);
        let adjacency = model.adjacency();
        let traversal = model.traverse(&adjacency);

        assert!(traversal.has_cycle());
        assert_eq!(traversal.back_edges, vec![(2, 0)]);
        // Every node still turns black exactly once.
        assert_eq!(traversal.postorder.len(), model.node_count());
    }

    #[test]
    fn test_traverse_self_loop() {
        let (nodes, mut edges) = model_fixture(&["a", "b"], &[("a", "b")]);
        edges.push(Edge::between("b", "b"));
        let model = GraphModel::from_elements(&nodes, &edges);
        let adjacency = model.adjacency();

        assert!(model.traverse(&adjacency).has_cycle());
    }

    #[test]
    fn test_traverse_covers_disconnected_components() {
        let (nodes, edges) = model_fixture(&["a", "b", "c", "d"], &[("a", "b"), ("c", "d")]);
        let model = GraphModel::from_elements(&nodes, &edges);
        let adjacency = model.adjacency();
        let traversal = model.traverse(&adjacency);

        assert!(!traversal.has_cycle());
        assert_eq!(traversal.postorder.len(), 4);
    }
}
