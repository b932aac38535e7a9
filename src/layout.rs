//! Hierarchical left-to-right layout engine.
//!
//! The engine treats the snapshot as a layered drawing problem: rank
//! assignment by topological depth, crossing reduction by barycenter
//! sweeps, then coordinate assignment from the fixed node footprint. It is
//! deterministic for a given topology and never fails: cyclic or
//! disconnected input degrades to a best-effort layering with ties and
//! cycles broken by insertion order. Layout is a convenience, not a
//! validity gate — validity is reported separately by
//! [`crate::validate::validate_dag`].

mod ordering;
mod positioning;
mod rank;

use log::debug;

use crate::{
    config::LayoutOptions,
    geometry::Size,
    graph::GraphModel,
    snapshot::{Edge, Node, PortSide, Snapshot},
};

/// The layered layout engine.
///
/// Spacing and footprint default to the editor's fixed constants and can be
/// adjusted per instance.
pub struct Engine {
    options: LayoutOptions,
}

impl Engine {
    /// Creates an engine with the default footprint and spacing.
    pub fn new() -> Self {
        Self {
            options: LayoutOptions::default(),
        }
    }

    /// Creates an engine from configured layout options.
    pub fn from_options(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Set the nominal node footprint used for collision-free spacing.
    pub fn set_footprint(&mut self, footprint: Size) -> &mut Self {
        self.options.node_width = footprint.width();
        self.options.node_height = footprint.height();
        self
    }

    /// Set the horizontal gap between consecutive ranks.
    pub fn set_rank_spacing(&mut self, spacing: f32) -> &mut Self {
        self.options.rank_spacing = spacing;
        self
    }

    /// Set the vertical gap between nodes within a rank.
    pub fn set_node_spacing(&mut self, spacing: f32) -> &mut Self {
        self.options.node_spacing = spacing;
        self
    }

    /// Set the offset of the drawing from the canvas origin.
    pub fn set_margin(&mut self, margin: f32) -> &mut Self {
        self.options.margin = margin;
        self
    }

    /// Computes a repositioned snapshot.
    ///
    /// The returned snapshot has the same ids, labels, edge sequence and
    /// edge count as the input; only node positions (and the fixed
    /// left-in/right-out role markers) are rewritten.
    pub fn calculate(&self, nodes: &[Node], edges: &[Edge]) -> Snapshot {
        debug!(
            nodes_len = nodes.len(),
            edges_len = edges.len();
            "Calculating layered layout",
        );

        let model = GraphModel::from_elements(nodes, edges);
        let successors = model.adjacency();
        let traversal = model.traverse(&successors);
        if traversal.has_cycle() {
            debug!(
                back_edges = traversal.back_edges.len();
                "Graph contains cycles; applying best-effort layering",
            );
        }

        let ranks = rank::assign_ranks(&successors, &traversal);
        let mut layers = ordering::layers_from_ranks(&ranks);
        let predecessors = ordering::predecessor_lists(&successors);
        ordering::order_layers(
            &mut layers,
            &predecessors,
            &successors,
            self.options.ordering_iterations,
        );

        let positions = positioning::assign_positions(&layers, nodes.len(), &self.options);

        let nodes = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| {
                let mut node = node.clone();
                node.position = positions[idx];
                node.source_position = PortSide::Right;
                node.target_position = PortSide::Left;
                node
            })
            .collect();

        Snapshot::new(nodes, edges.to_vec())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Lays out a snapshot with the default engine.
pub fn layouted_elements(nodes: &[Node], edges: &[Edge]) -> Snapshot {
    Engine::new().calculate(nodes, edges)
}
