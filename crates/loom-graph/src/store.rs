//! The canonical graph store
//!
//! Owns the node and edge sets. Every other component reads and mutates
//! through this type. Maps are insertion-ordered, so iteration (and hence
//! neighbor discovery in the context aggregator) is deterministic for an
//! unchanged graph.

use crate::edge::Edge;
use crate::error::GraphError;
use crate::ids::{EdgeId, NodeId};
use crate::node::{Node, NodeData};
use indexmap::IndexMap;

/// In-memory store of canvas nodes and edges
///
/// Invariant: both endpoints of every stored edge reference stored nodes.
/// `add_edge` validates endpoints up front and `remove_node` cascades to
/// incident edges within the same synchronous call, so no reader ever
/// observes a dangling edge.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
}

impl GraphStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node
    ///
    /// # Errors
    /// `GraphError::DuplicateId` if a node with the same id exists.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateId(node.id.to_string()));
        }
        let id = node.id.clone();
        tracing::debug!(node = %id, type_tag = node.type_tag.as_str(), "node added");
        self.nodes.insert(id.clone(), node);
        Ok(id)
    }

    /// Replace a node's data wholesale
    ///
    /// There is no partial-field merge: callers merge before writing.
    ///
    /// # Errors
    /// `GraphError::NodeNotFound` if the node is absent.
    pub fn update_node(&mut self, id: &NodeId, data: NodeData) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        node.data = data;
        tracing::debug!(node = %id, "node data replaced");
        Ok(())
    }

    /// Remove a node, cascading removal of its incident edges
    ///
    /// The cascade happens inside this call, so the store is consistent for
    /// any reader as soon as it returns. Returns the removed node.
    ///
    /// # Errors
    /// `GraphError::NodeNotFound` if the node is absent.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<Node, GraphError> {
        let node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        let before = self.edges.len();
        self.edges.retain(|_, edge| !edge.touches(id));
        tracing::debug!(
            node = %id,
            cascaded_edges = before - self.edges.len(),
            "node removed"
        );
        Ok(node)
    }

    /// Insert an edge after validating both endpoints
    ///
    /// # Errors
    /// `GraphError::InvalidReference` naming the first missing endpoint;
    /// `GraphError::DuplicateId` if the edge id is taken.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeId, GraphError> {
        if !self.nodes.contains_key(&edge.source) {
            return Err(GraphError::invalid_reference(edge.source.clone()));
        }
        if !self.nodes.contains_key(&edge.target) {
            return Err(GraphError::invalid_reference(edge.target.clone()));
        }
        if self.edges.contains_key(&edge.id) {
            return Err(GraphError::DuplicateId(edge.id.to_string()));
        }
        let id = edge.id.clone();
        tracing::debug!(edge = %id, source = %edge.source, target = %edge.target, "edge added");
        self.edges.insert(id.clone(), edge);
        Ok(id)
    }

    /// Remove an edge
    ///
    /// # Errors
    /// `GraphError::EdgeNotFound` if the edge is absent.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<Edge, GraphError> {
        self.edges
            .shift_remove(id)
            .ok_or_else(|| GraphError::EdgeNotFound(id.clone()))
    }

    /// Look up a node
    #[inline]
    #[must_use]
    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up an edge
    #[inline]
    #[must_use]
    pub fn get_edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Whether a node exists
    #[inline]
    #[must_use]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Incident edges and the node on their far side, in edge insertion order
    ///
    /// Adjacency is undirected: an edge is reported regardless of whether
    /// `id` is its declared source or target. A missing node yields an
    /// empty vec, matching "no neighbors".
    #[must_use]
    pub fn neighbors(&self, id: &NodeId) -> Vec<(&Edge, &Node)> {
        self.edges
            .values()
            .filter_map(|edge| {
                let other = edge.other_endpoint(id)?;
                self.nodes.get(other).map(|node| (edge, node))
            })
            .collect()
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of nodes
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the store holds no nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
