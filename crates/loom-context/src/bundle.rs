//! The assembled context bundle
//!
//! A read-only aggregate of projected neighborhood text. Entries keep
//! discovery order within a category; categories render in the fixed
//! priority order of [`ProjectionCategory::ORDER`].

use crate::projection::{Projection, ProjectionCategory};
use loom_graph::NodeId;

/// Serialized neighborhood context for one focal node
///
/// Ephemeral and derived: rebuilt on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBundle {
    focal: NodeId,
    sections: Vec<(ProjectionCategory, Vec<String>)>,
}

impl ContextBundle {
    /// Create an empty bundle for a focal node
    #[must_use]
    pub(crate) fn new(focal: NodeId) -> Self {
        Self {
            focal,
            sections: Vec::new(),
        }
    }

    /// Append a projection, preserving discovery order within its category
    pub(crate) fn push(&mut self, projection: Projection) {
        match self
            .sections
            .iter_mut()
            .find(|(category, _)| *category == projection.category)
        {
            Some((_, entries)) => entries.push(projection.text),
            None => self
                .sections
                .push((projection.category, vec![projection.text])),
        }
    }

    /// The focal node this bundle was built around
    #[inline]
    #[must_use]
    pub fn focal(&self) -> &NodeId {
        &self.focal
    }

    /// Whether the neighborhood contributed nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|(_, entries)| entries.is_empty())
    }

    /// Total number of projected entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.iter().map(|(_, entries)| entries.len()).sum()
    }

    /// Entries of one category, in discovery order
    #[must_use]
    pub fn entries(&self, category: ProjectionCategory) -> &[String] {
        self.sections
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(&[], |(_, entries)| entries.as_slice())
    }

    /// Render the bundle to its canonical string form
    ///
    /// All entries of one category together under its heading, categories
    /// in fixed priority order, empty categories skipped. Byte-identical
    /// across calls for the same bundle.
    #[must_use]
    pub fn render(&self) -> String {
        let mut sections = Vec::new();
        for category in ProjectionCategory::ORDER {
            let entries = self.entries(category);
            if entries.is_empty() {
                continue;
            }
            let mut section = format!("## {}", category.heading());
            for entry in entries {
                section.push('\n');
                section.push_str(entry);
            }
            sections.push(section);
        }
        sections.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn projection(category: ProjectionCategory, text: &str) -> Projection {
        Projection {
            category,
            text: text.to_string(),
        }
    }

    #[test]
    fn empty_bundle_renders_empty() {
        let bundle = ContextBundle::new(NodeId::new("f"));
        assert!(bundle.is_empty());
        assert_eq!(bundle.len(), 0);
        assert_eq!(bundle.render(), "");
    }

    #[test]
    fn render_groups_by_category_in_priority_order() {
        let mut bundle = ContextBundle::new(NodeId::new("f"));
        // Discovery order interleaves categories.
        bundle.push(projection(ProjectionCategory::Links, "Docs <https://d>"));
        bundle.push(projection(ProjectionCategory::Notes, "A: alpha"));
        bundle.push(projection(ProjectionCategory::Notes, "B: beta"));
        bundle.push(projection(ProjectionCategory::Media, "[media] P"));

        assert_eq!(
            bundle.render(),
            "## Notes\nA: alpha\nB: beta\n\n## Links\nDocs <https://d>\n\n## Media\n[media] P"
        );
    }

    #[test]
    fn entries_keep_discovery_order() {
        let mut bundle = ContextBundle::new(NodeId::new("f"));
        bundle.push(projection(ProjectionCategory::Notes, "first"));
        bundle.push(projection(ProjectionCategory::Notes, "second"));

        assert_eq!(
            bundle.entries(ProjectionCategory::Notes),
            &["first".to_string(), "second".to_string()]
        );
        assert!(bundle.entries(ProjectionCategory::Media).is_empty());
    }
}
