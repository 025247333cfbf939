//! Node model for the canvas graph
//!
//! A node is a typed, positioned content unit. The type tag drives which
//! capabilities apply to it (see `loom-dispatch`) and how it is projected
//! into a context bundle (see `loom-context`).

use crate::ids::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Content type of a canvas node
///
/// Determines applicable processors and the textual projection used when
/// the node appears in a context bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Free-form user note
    Note,
    /// External link with optional fetched preview
    Link,
    /// Longer-form document content
    Document,
    /// Image / audio / video reference
    Media,
    /// Derived analysis output over other nodes
    Analysis,
    /// Content produced by a generation service
    Generated,
}

impl NodeType {
    /// Stable lowercase name, used in logs and payloads
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Link => "link",
            Self::Document => "document",
            Self::Media => "media",
            Self::Analysis => "analysis",
            Self::Generated => "generated",
        }
    }
}

/// Canvas position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a position
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Node payload
///
/// Replaced wholesale on update: there is no partial-field diffing
/// contract, so callers merge before writing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeData {
    /// Short display label
    pub label: String,
    /// Primary textual content, when the type carries any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// External URL for link/media nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Type-specific extra fields
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl NodeData {
    /// Create data with a label only
    #[inline]
    #[must_use]
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// With textual content
    #[inline]
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// With a URL
    #[inline]
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// With a metadata entry
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A typed, positioned content unit on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id
    pub id: NodeId,
    /// Content type tag
    pub type_tag: NodeType,
    /// Canvas position
    pub position: Position,
    /// Payload
    pub data: NodeData,
}

impl Node {
    /// Create a node with a generated id
    #[must_use]
    pub fn new(type_tag: NodeType, position: Position, data: NodeData) -> Self {
        Self {
            id: NodeId::generate(),
            type_tag,
            position,
            data,
        }
    }

    /// Create a node with an explicit id
    #[must_use]
    pub fn with_id(
        id: impl Into<NodeId>,
        type_tag: NodeType,
        position: Position,
        data: NodeData,
    ) -> Self {
        Self {
            id: id.into(),
            type_tag,
            position,
            data,
        }
    }
}
