//! Bounded breadth-first context aggregation

use crate::bundle::ContextBundle;
use crate::projection::project;
use loom_graph::{GraphStore, NodeId};
use std::collections::{HashSet, VecDeque};

/// Default traversal bound in hops
pub const DEFAULT_DEPTH: usize = 2;

/// Errors from context aggregation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// The focal node is not in the store
    #[error("focal node not found: {0}")]
    FocalNodeNotFound(NodeId),
}

/// Assembles context bundles from a focal node's neighborhood
#[derive(Debug, Clone, Copy)]
pub struct ContextAggregator {
    max_depth: usize,
}

impl ContextAggregator {
    /// Create an aggregator with the default depth bound
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_DEPTH,
        }
    }

    /// With a custom depth bound
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Configured depth bound
    #[inline]
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build a context bundle from the focal node's bounded neighborhood
    ///
    /// Breadth-first over undirected adjacency, at most `max_depth` hops,
    /// each node visited once. Neighbor order is edge insertion order, so
    /// two calls on an unchanged graph produce byte-identical bundles.
    ///
    /// The focal node itself is the generation target, not context: it is
    /// never projected, and a focal node with no neighbors yields an empty
    /// bundle rather than an error.
    ///
    /// # Errors
    /// `ContextError::FocalNodeNotFound` if the focal id is absent.
    pub fn build_context(
        &self,
        store: &GraphStore,
        focal: &NodeId,
    ) -> Result<ContextBundle, ContextError> {
        if !store.contains_node(focal) {
            return Err(ContextError::FocalNodeNotFound(focal.clone()));
        }

        let mut bundle = ContextBundle::new(focal.clone());
        let mut visited: HashSet<NodeId> = HashSet::from([focal.clone()]);
        let mut frontier: VecDeque<(NodeId, usize)> = VecDeque::from([(focal.clone(), 0)]);

        while let Some((current, depth)) = frontier.pop_front() {
            if depth == self.max_depth {
                continue;
            }
            for (_, node) in store.neighbors(&current) {
                if !visited.insert(node.id.clone()) {
                    continue;
                }
                bundle.push(project(node));
                frontier.push_back((node.id.clone(), depth + 1));
            }
        }

        tracing::debug!(
            focal = %focal,
            depth = self.max_depth,
            entries = bundle.len(),
            "context bundle built"
        );
        Ok(bundle)
    }
}

impl Default for ContextAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionCategory;
    use loom_graph::{Edge, Node, NodeData, NodeType, Position};

    fn note(id: &str, content: &str) -> Node {
        Node::with_id(
            id,
            NodeType::Note,
            Position::default(),
            NodeData::labeled(id.to_uppercase()).with_content(content),
        )
    }

    /// f - a - b - c, with a media node m hanging off f.
    fn chain_store() -> GraphStore {
        let mut store = GraphStore::new();
        store.add_node(note("f", "focal")).unwrap();
        store.add_node(note("a", "alpha")).unwrap();
        store.add_node(note("b", "beta")).unwrap();
        store.add_node(note("c", "gamma")).unwrap();
        store
            .add_node(Node::with_id(
                "m",
                NodeType::Media,
                Position::default(),
                NodeData::labeled("Photo"),
            ))
            .unwrap();
        store.add_edge(Edge::new("f", "a")).unwrap();
        store.add_edge(Edge::new("a", "b")).unwrap();
        store.add_edge(Edge::new("b", "c")).unwrap();
        store.add_edge(Edge::new("m", "f")).unwrap();
        store
    }

    #[test]
    fn depth_bound_limits_hops() {
        let store = chain_store();
        let focal = NodeId::new("f");

        let bundle = ContextAggregator::new()
            .with_max_depth(2)
            .build_context(&store, &focal)
            .unwrap();

        // Two hops from f: a, b, m. c is three hops out.
        let notes = bundle.entries(ProjectionCategory::Notes);
        assert_eq!(notes, &["A: alpha".to_string(), "B: beta".to_string()]);
        assert_eq!(bundle.entries(ProjectionCategory::Media).len(), 1);
        assert_eq!(bundle.len(), 3);
    }

    #[test]
    fn traversal_is_undirected() {
        // Edge m -> f points at the focal; m must still be reachable.
        let store = chain_store();
        let bundle = ContextAggregator::new()
            .build_context(&store, &NodeId::new("f"))
            .unwrap();
        assert_eq!(bundle.entries(ProjectionCategory::Media).len(), 1);
    }

    #[test]
    fn focal_node_is_not_projected() {
        let store = chain_store();
        let bundle = ContextAggregator::new()
            .build_context(&store, &NodeId::new("f"))
            .unwrap();
        let notes = bundle.entries(ProjectionCategory::Notes);
        assert!(notes.iter().all(|entry| !entry.contains("focal")));
    }

    #[test]
    fn no_neighbors_yields_empty_bundle() {
        let mut store = GraphStore::new();
        store.add_node(note("f", "alone")).unwrap();

        let bundle = ContextAggregator::new()
            .build_context(&store, &NodeId::new("f"))
            .unwrap();
        assert!(bundle.is_empty());
        assert_eq!(bundle.render(), "");
    }

    #[test]
    fn missing_focal_is_an_error() {
        let store = GraphStore::new();
        let err = ContextAggregator::new()
            .build_context(&store, &NodeId::new("ghost"))
            .unwrap_err();
        assert_eq!(err, ContextError::FocalNodeNotFound(NodeId::new("ghost")));
    }

    #[test]
    fn cycles_terminate_and_visit_once() {
        let mut store = GraphStore::new();
        store.add_node(note("f", "focal")).unwrap();
        store.add_node(note("a", "alpha")).unwrap();
        store.add_node(note("b", "beta")).unwrap();
        store.add_edge(Edge::new("f", "a")).unwrap();
        store.add_edge(Edge::new("a", "b")).unwrap();
        store.add_edge(Edge::new("b", "f")).unwrap();

        let bundle = ContextAggregator::new()
            .with_max_depth(10)
            .build_context(&store, &NodeId::new("f"))
            .unwrap();

        // Each of a, b projected exactly once despite the cycle.
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn rendering_is_deterministic() {
        let store = chain_store();
        let aggregator = ContextAggregator::new();
        let focal = NodeId::new("f");

        let first = aggregator.build_context(&store, &focal).unwrap().render();
        let second = aggregator.build_context(&store, &focal).unwrap().render();
        assert_eq!(first, second);
    }

    #[test]
    fn depth_zero_yields_empty_bundle() {
        let store = chain_store();
        let bundle = ContextAggregator::new()
            .with_max_depth(0)
            .build_context(&store, &NodeId::new("f"))
            .unwrap();
        assert!(bundle.is_empty());
    }
}
