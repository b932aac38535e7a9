//! The editing collaborator.
//!
//! [`Editor`] owns the canonical snapshot and plays the role the
//! interactive surface plays around the core: it allocates node ids,
//! spawns nodes at a pseudo-random position, wires connections under the
//! edge-direction rule, and calls into the validator and the layout engine
//! on demand. The core itself stays stateless — every call hands it the
//! current snapshot.

use log::debug;
use rand::{RngExt, SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::{
    error::DagEditError,
    geometry::Point,
    layout::Engine,
    snapshot::{Edge, Node, PortSide, Snapshot, derived_edge_id},
    validate::validate_dag,
};

/// Side length of the square region new nodes spawn into.
const SPAWN_REGION: f32 = 250.0;

/// Allocates session-unique node identifiers.
///
/// Owned by the editor rather than living in module-global state, so two
/// editors never share a counter and ids are never reused within a session.
#[derive(Debug, Default)]
pub struct NodeIdGenerator {
    next: u64,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the counter past every id already present in a snapshot.
    fn resuming_after<'a>(ids: impl Iterator<Item = &'a str>) -> Self {
        let next = ids
            .filter_map(|id| id.strip_prefix("node_"))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .map(|n| n + 1)
            .max()
            .unwrap_or(0);
        Self { next }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("node_{}", self.next);
        self.next += 1;
        id
    }
}

/// A requested connection between two nodes, with optional sub-ports.
#[derive(Debug, Clone, Copy, Default)]
pub struct Connection<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub source_handle: Option<&'a str>,
    pub target_handle: Option<&'a str>,
}

impl<'a> Connection<'a> {
    pub fn new(source: &'a str, target: &'a str) -> Self {
        Self {
            source,
            target,
            source_handle: None,
            target_handle: None,
        }
    }
}

/// Owns a snapshot and mutates it through editing operations.
pub struct Editor {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    ids: NodeIdGenerator,
    rng: StdRng,
    engine: Engine,
}

impl Editor {
    /// Creates an empty editor with an OS-seeded spawn RNG.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Creates an empty editor with a fixed seed, for reproducible spawns.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            ids: NodeIdGenerator::new(),
            rng,
            engine: Engine::new(),
        }
    }

    /// Resumes editing an existing snapshot.
    ///
    /// The id generator skips past any `node_<n>` ids already present so
    /// identifiers are not reused.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let ids = NodeIdGenerator::resuming_after(snapshot.nodes.iter().map(|n| n.id.as_str()));
        Self {
            nodes: snapshot.nodes,
            edges: snapshot.edges,
            ids,
            rng: StdRng::from_rng(&mut rand::rng()),
            engine: Engine::new(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Adds a node with a fresh id at a random position inside the spawn
    /// region and returns it.
    pub fn add_node(&mut self, label: impl Into<String>) -> &Node {
        let id = self.ids.next_id();
        let position = Point::new(
            self.rng.random_range(0.0..SPAWN_REGION),
            self.rng.random_range(0.0..SPAWN_REGION),
        );
        debug!(node_id = id; "Adding node");
        self.nodes.push(Node::new(id, label, position));
        self.nodes.last().expect("node was just pushed")
    }

    /// Wires a connection between two existing nodes and returns the edge.
    ///
    /// Rejects self-loops, unknown endpoints, and connections that violate
    /// the edge-direction rule (edges leave the source's right face and
    /// enter the target's left face). A duplicate of an existing connection
    /// collapses to the existing edge, since edge identity is the
    /// source-target pair.
    pub fn connect(&mut self, connection: Connection<'_>) -> Result<&Edge, DagEditError> {
        let Connection {
            source,
            target,
            source_handle,
            target_handle,
        } = connection;

        if source == target {
            return Err(DagEditError::Graph(format!(
                "Edge endpoints must differ: {source}"
            )));
        }

        let source_node = self.nodes.iter().find(|n| n.id == source);
        let target_node = self.nodes.iter().find(|n| n.id == target);
        let (source_node, target_node) = match (source_node, target_node) {
            (Some(s), Some(t)) => (s, t),
            _ => {
                return Err(DagEditError::Graph(format!(
                    "Connection refers to undefined nodes: {source} -> {target}"
                )));
            }
        };

        if source_node.source_position != PortSide::Right
            || target_node.target_position != PortSide::Left
        {
            return Err(DagEditError::Graph(format!(
                "Invalid connection {source} -> {target}: edges leave the right face and enter the left face"
            )));
        }

        let id = derived_edge_id(source, target);
        if let Some(existing) = self.edges.iter().position(|e| e.id == id) {
            debug!(edge_id = id; "Connection already exists");
            return Ok(&self.edges[existing]);
        }

        debug!(edge_id = id; "Adding edge");
        self.edges.push(Edge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            source_handle: source_handle.map(str::to_string),
            target_handle: target_handle.map(str::to_string),
        });
        Ok(self.edges.last().expect("edge was just pushed"))
    }

    /// Removes a node and every edge incident to it.
    ///
    /// Returns whether the node existed. Cascading keeps the snapshot's
    /// referential invariant: edges never outlive their endpoints.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|node| node.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges
            .retain(|edge| edge.source != id && edge.target != id);
        debug!(node_id = id; "Removed node");
        true
    }

    /// Removes a single edge by id. Returns whether it existed.
    pub fn remove_edge(&mut self, id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|edge| edge.id != id);
        self.edges.len() != before
    }

    /// Recomputes the validity of the current snapshot.
    pub fn is_valid(&self) -> bool {
        validate_dag(&self.nodes, &self.edges)
    }

    /// Replaces the snapshot with the layout engine's output.
    pub fn auto_layout(&mut self) {
        let layouted = self.engine.calculate(&self.nodes, &self.edges);
        self.nodes = layouted.nodes;
        self.edges = layouted.edges;
    }

    /// Pretty-printed JSON of the current snapshot, verbatim.
    pub fn preview_json(&self) -> Result<String, DagEditError> {
        #[derive(Serialize)]
        struct Preview<'a> {
            nodes: &'a [Node],
            edges: &'a [Edge],
        }

        Ok(serde_json::to_string_pretty(&Preview {
            nodes: &self.nodes,
            edges: &self.edges,
        })?)
    }

    /// Clones the current snapshot out of the editor.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.nodes.clone(), self.edges.clone())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
