//! The graph snapshot data model.
//!
//! A snapshot is the full, at-a-point-in-time representation of the node and
//! edge sequences exchanged between the editing surface and the core. The
//! core never retains a snapshot across calls: the validator borrows one for
//! the duration of a check, the layout engine borrows one and returns a full
//! replacement.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// The face of a node a connection attaches to.
///
/// Every node in this tool is a "left-in, right-out" node: edges enter on the
/// [`PortSide::Left`] face and leave on the [`PortSide::Right`] face. The
/// markers are carried per node so the serialized form is self-describing,
/// but they are an invariant of the node type, not configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortSide {
    Left,
    Right,
}

/// A single node in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier, caller-assigned and never reused within a session.
    pub id: String,

    /// Display label.
    pub label: String,

    /// Canvas position. Collaborator-assigned before layout,
    /// layout-engine-owned after.
    pub position: Point,

    /// Where edges leave this node.
    #[serde(default = "PortSide::source_default")]
    pub source_position: PortSide,

    /// Where edges enter this node.
    #[serde(default = "PortSide::target_default")]
    pub target_position: PortSide,
}

impl PortSide {
    fn source_default() -> Self {
        PortSide::Right
    }

    fn target_default() -> Self {
        PortSide::Left
    }
}

impl Node {
    /// Creates a node with the fixed left-in, right-out role markers.
    pub fn new(id: impl Into<String>, label: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            source_position: PortSide::Right,
            target_position: PortSide::Left,
        }
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Identifier derived from the endpoint pair, see [`derived_edge_id`].
    pub id: String,

    /// Id of the source node.
    pub source: String,

    /// Id of the target node.
    pub target: String,

    /// Sub-port on the source node, opaque to the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,

    /// Sub-port on the target node, opaque to the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Edge {
    /// Creates an edge between two node ids with the derived identifier.
    pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: derived_edge_id(&source, &target),
            source,
            target,
            source_handle: None,
            target_handle: None,
        }
    }
}

/// Derives the deterministic edge identifier for a source/target pair.
///
/// Edge identity is the endpoint pair, so two connections between the same
/// nodes collapse to the same id.
pub fn derived_edge_id(source: &str, target: &str) -> String {
    format!("{source}-{target}")
}

/// An ordered node/edge sequence pair.
///
/// Node order is insertion order and is used only for display and for
/// deterministic tie-breaking in the layout engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Snapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }
}
