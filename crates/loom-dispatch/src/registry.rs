//! Processor registry

use loom_graph::{Node, NodeType};
use serde::Serialize;

/// Identifier of a processing behavior
///
/// Behavior ids are static configuration, hence the `'static` backing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BehaviorId(pub &'static str);

impl BehaviorId {
    /// Behavior id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for BehaviorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One registered capability
#[derive(Debug, Clone)]
pub struct Registration {
    /// Pure predicate over a node's static fields
    pub predicate: fn(&Node) -> bool,
    /// Behavior offered when the predicate matches
    pub behavior: BehaviorId,
    /// Human-readable name for menus
    pub display_name: &'static str,
}

/// Ordered registry of node-type capabilities
///
/// Resolution preserves registration order; the first match for a node is
/// its default-active behavior.
#[derive(Debug, Clone)]
pub struct ProcessorRegistry {
    registrations: Vec<Registration>,
    fallback: BehaviorId,
}

impl ProcessorRegistry {
    /// Designated fallback behavior when nothing is selected
    pub const FALLBACK: BehaviorId = BehaviorId("canvas_overview");

    /// Create an empty registry with the standard fallback
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            fallback: Self::FALLBACK,
        }
    }

    /// Built-in capability table for the standard node types
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(is_text_bearing, BehaviorId("summarize"), "Summarize");
        registry.register(is_text_bearing, BehaviorId("analyze"), "Analyze");
        registry.register(is_note, BehaviorId("expand"), "Expand note");
        registry.register(is_link, BehaviorId("fetch_preview"), "Fetch preview");
        registry.register(is_media, BehaviorId("describe_media"), "Describe media");
        registry.register(any_node, BehaviorId("auto_link"), "Suggest connections");
        registry
    }

    /// Append a registration
    ///
    /// Order matters: earlier registrations resolve first.
    pub fn register(
        &mut self,
        predicate: fn(&Node) -> bool,
        behavior: BehaviorId,
        display_name: &'static str,
    ) {
        self.registrations.push(Registration {
            predicate,
            behavior,
            display_name,
        });
    }

    /// Override the designated fallback behavior
    #[inline]
    #[must_use]
    pub fn with_fallback(mut self, fallback: BehaviorId) -> Self {
        self.fallback = fallback;
        self
    }

    /// All behaviors applicable to a node, in registration order
    ///
    /// Multiple matches are legitimate capability overlap; no match yields
    /// an empty vec.
    #[must_use]
    pub fn resolve(&self, node: &Node) -> Vec<BehaviorId> {
        self.registrations
            .iter()
            .filter(|r| (r.predicate)(node))
            .map(|r| r.behavior)
            .collect()
    }

    /// The default-active behavior for a selection
    ///
    /// First match for a selected node; the designated fallback when
    /// nothing is selected; `None` for a node no predicate covers.
    #[must_use]
    pub fn resolve_default(&self, node: Option<&Node>) -> Option<BehaviorId> {
        match node {
            Some(node) => self
                .registrations
                .iter()
                .find(|r| (r.predicate)(node))
                .map(|r| r.behavior),
            None => Some(self.fallback),
        }
    }

    /// Display name of a behavior, if registered
    #[must_use]
    pub fn display_name(&self, behavior: BehaviorId) -> Option<&'static str> {
        self.registrations
            .iter()
            .find(|r| r.behavior == behavior)
            .map(|r| r.display_name)
    }

    /// Number of registrations
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether the registry has no registrations
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn is_text_bearing(node: &Node) -> bool {
    matches!(
        node.type_tag,
        NodeType::Note | NodeType::Document | NodeType::Analysis | NodeType::Generated
    )
}

fn is_note(node: &Node) -> bool {
    node.type_tag == NodeType::Note
}

fn is_link(node: &Node) -> bool {
    node.type_tag == NodeType::Link
}

fn is_media(node: &Node) -> bool {
    node.type_tag == NodeType::Media
}

fn any_node(_node: &Node) -> bool {
    true
}
