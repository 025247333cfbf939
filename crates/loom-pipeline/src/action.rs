//! Transformation actions
//!
//! A [`TransformAction`] turns one node into one generation request. The
//! runner stays ignorant of prompt shape; actions own it.

use crate::gateway::{GenerationRequest, ResponseFormat};
use loom_graph::Node;

/// One transformation applied across a batch
pub trait TransformAction: Send + Sync {
    /// Stable action identifier for logs and summaries
    fn id(&self) -> &str;

    /// Build the generation request for one node
    fn build_request(&self, node: &Node) -> GenerationRequest;
}

/// Instruction-driven action
///
/// Sends a fixed instruction with the node's own text as context. Richer
/// actions (e.g. neighborhood-aware ones) implement [`TransformAction`]
/// directly.
#[derive(Debug, Clone)]
pub struct InstructionAction {
    id: String,
    instruction: String,
    format: ResponseFormat,
}

impl InstructionAction {
    /// Create an action from an id and instruction
    #[must_use]
    pub fn new(id: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            instruction: instruction.into(),
            format: ResponseFormat::Text,
        }
    }

    /// With an explicit response format
    #[inline]
    #[must_use]
    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }
}

impl TransformAction for InstructionAction {
    fn id(&self) -> &str {
        &self.id
    }

    fn build_request(&self, node: &Node) -> GenerationRequest {
        let context = match node.data.content.as_deref() {
            Some(content) if !content.is_empty() => {
                format!("{}: {}", node.data.label, content)
            }
            _ => node.data.label.clone(),
        };
        GenerationRequest::new(self.instruction.clone(), context).with_format(self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loom_graph::{NodeData, NodeType, Position};

    #[test]
    fn instruction_action_uses_node_text_as_context() {
        let action = InstructionAction::new("summarize", "Summarize this node.");
        let node = Node::with_id(
            "n",
            NodeType::Note,
            Position::default(),
            NodeData::labeled("Idea").with_content("graphs everywhere"),
        );

        let request = action.build_request(&node);
        assert_eq!(request.instruction, "Summarize this node.");
        assert_eq!(request.context_bundle, "Idea: graphs everywhere");
        assert_eq!(request.response_format, ResponseFormat::Text);
    }

    #[test]
    fn content_free_node_falls_back_to_label() {
        let action = InstructionAction::new("summarize", "Summarize.");
        let node = Node::with_id(
            "n",
            NodeType::Media,
            Position::default(),
            NodeData::labeled("Photo"),
        );
        assert_eq!(action.build_request(&node).context_bundle, "Photo");
    }
}
