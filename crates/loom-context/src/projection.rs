//! Type-specific textual projections
//!
//! Each visited node contributes one line of text to the bundle, shaped by
//! its type tag. Projections are grouped into categories; categories render
//! in a fixed priority order regardless of discovery order.

use loom_graph::{Node, NodeType};

/// Bundle section a projection lands in
///
/// Declaration order is the fixed rendering priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectionCategory {
    /// Free-form notes and generated text
    Notes,
    /// Longer-form documents
    Documents,
    /// Derived analysis results
    Analyses,
    /// External links
    Links,
    /// Media references
    Media,
}

impl ProjectionCategory {
    /// All categories in rendering priority order
    pub const ORDER: [Self; 5] = [
        Self::Notes,
        Self::Documents,
        Self::Analyses,
        Self::Links,
        Self::Media,
    ];

    /// Section heading used when rendering
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Notes => "Notes",
            Self::Documents => "Documents",
            Self::Analyses => "Analyses",
            Self::Links => "Links",
            Self::Media => "Media",
        }
    }
}

/// A single projected entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Section the entry belongs to
    pub category: ProjectionCategory,
    /// Serialized text
    pub text: String,
}

/// Project a node into its category and textual form
///
/// Text-bearing types contribute their content (label-only when content is
/// absent); link nodes contribute label plus URL; media nodes contribute a
/// label with a reference marker rather than raw bytes. Generated nodes
/// read as notes: their text is context like any other.
#[must_use]
pub fn project(node: &Node) -> Projection {
    let label = node.data.label.as_str();
    match node.type_tag {
        NodeType::Note | NodeType::Generated => Projection {
            category: ProjectionCategory::Notes,
            text: with_content(label, node.data.content.as_deref()),
        },
        NodeType::Document => Projection {
            category: ProjectionCategory::Documents,
            text: with_content(label, node.data.content.as_deref()),
        },
        NodeType::Analysis => Projection {
            category: ProjectionCategory::Analyses,
            text: with_content(label, node.data.content.as_deref()),
        },
        NodeType::Link => Projection {
            category: ProjectionCategory::Links,
            text: match node.data.url.as_deref() {
                Some(url) => format!("{label} <{url}>"),
                None => label.to_string(),
            },
        },
        NodeType::Media => Projection {
            category: ProjectionCategory::Media,
            text: match node.data.url.as_deref() {
                Some(url) => format!("[media] {label} <{url}>"),
                None => format!("[media] {label}"),
            },
        },
    }
}

fn with_content(label: &str, content: Option<&str>) -> String {
    match content {
        Some(content) if !content.is_empty() => format!("{label}: {content}"),
        _ => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loom_graph::{NodeData, Position};

    fn node(type_tag: NodeType, data: NodeData) -> Node {
        Node::with_id("n", type_tag, Position::default(), data)
    }

    #[test]
    fn note_projects_content() {
        let p = project(&node(
            NodeType::Note,
            NodeData::labeled("Idea").with_content("graphs are nice"),
        ));
        assert_eq!(p.category, ProjectionCategory::Notes);
        assert_eq!(p.text, "Idea: graphs are nice");
    }

    #[test]
    fn note_without_content_projects_label() {
        let p = project(&node(NodeType::Note, NodeData::labeled("Idea")));
        assert_eq!(p.text, "Idea");
    }

    #[test]
    fn generated_projects_as_note() {
        let p = project(&node(
            NodeType::Generated,
            NodeData::labeled("Summary").with_content("generated text"),
        ));
        assert_eq!(p.category, ProjectionCategory::Notes);
    }

    #[test]
    fn analysis_projects_result_text() {
        let p = project(&node(
            NodeType::Analysis,
            NodeData::labeled("Sentiment").with_content("mostly positive"),
        ));
        assert_eq!(p.category, ProjectionCategory::Analyses);
        assert_eq!(p.text, "Sentiment: mostly positive");
    }

    #[test]
    fn link_projects_url() {
        let p = project(&node(
            NodeType::Link,
            NodeData::labeled("Docs").with_url("https://example.org"),
        ));
        assert_eq!(p.category, ProjectionCategory::Links);
        assert_eq!(p.text, "Docs <https://example.org>");
    }

    #[test]
    fn media_projects_reference_marker() {
        let p = project(&node(NodeType::Media, NodeData::labeled("Photo")));
        assert_eq!(p.category, ProjectionCategory::Media);
        assert_eq!(p.text, "[media] Photo");
    }

    #[test]
    fn category_order_is_stable() {
        assert_eq!(ProjectionCategory::ORDER[0], ProjectionCategory::Notes);
        assert_eq!(ProjectionCategory::ORDER[4], ProjectionCategory::Media);
    }
}
