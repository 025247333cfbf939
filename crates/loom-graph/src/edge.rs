//! Edge model for the canvas graph

use crate::ids::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};

/// Visual/provenance style of an edge
///
/// Machine-inferred edges carry a distinguishing style so the UI can render
/// them apart from user-drawn ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    /// Drawn directly by the user
    #[default]
    UserDrawn,
    /// Created by the auto-link inferencer
    Inferred,
}

/// A labeled, directed connection between two nodes
///
/// Direction is declarative (source/target); traversal in the context
/// aggregator treats edges as undirected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique id
    pub id: EdgeId,
    /// Declared source node
    pub source: NodeId,
    /// Declared target node
    pub target: NodeId,
    /// Optional relationship label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Provenance style tag
    pub style: EdgeStyle,
}

impl Edge {
    /// Create a user-drawn edge with a generated id
    #[must_use]
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: EdgeId::generate(),
            source: source.into(),
            target: target.into(),
            label: None,
            style: EdgeStyle::UserDrawn,
        }
    }

    /// With a relationship label
    #[inline]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// With an explicit style tag
    #[inline]
    #[must_use]
    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint at all
    #[must_use]
    pub fn other_endpoint(&self, id: &NodeId) -> Option<&NodeId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }

    /// Whether `id` is one of this edge's endpoints
    #[inline]
    #[must_use]
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_builder() {
        let edge = Edge::new("a", "b")
            .with_label("cites")
            .with_style(EdgeStyle::Inferred);

        assert_eq!(edge.source.as_str(), "a");
        assert_eq!(edge.target.as_str(), "b");
        assert_eq!(edge.label.as_deref(), Some("cites"));
        assert_eq!(edge.style, EdgeStyle::Inferred);
    }

    #[test]
    fn other_endpoint_both_directions() {
        let edge = Edge::new("a", "b");
        assert_eq!(edge.other_endpoint(&"a".into()), Some(&"b".into()));
        assert_eq!(edge.other_endpoint(&"b".into()), Some(&"a".into()));
        assert_eq!(edge.other_endpoint(&"c".into()), None);
    }

    #[test]
    fn default_style_is_user_drawn() {
        assert_eq!(Edge::new("a", "b").style, EdgeStyle::UserDrawn);
    }
}
