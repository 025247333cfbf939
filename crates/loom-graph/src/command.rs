//! Typed mutation commands
//!
//! All graph mutation can be expressed as a [`GraphCommand`] applied
//! through [`GraphStore::apply`]. This gives callers one auditable,
//! testable entrance instead of ad hoc events crossing component
//! boundaries. Direct store methods remain available; `apply` is a thin
//! dispatcher over them.

use crate::edge::Edge;
use crate::error::GraphError;
use crate::ids::{EdgeId, NodeId};
use crate::node::{Node, NodeData};
use crate::store::GraphStore;

/// A single graph mutation
#[derive(Debug, Clone, PartialEq)]
pub enum GraphCommand {
    /// Insert a node
    AddNode(Node),
    /// Replace a node's data wholesale
    UpdateNode {
        /// Target node
        id: NodeId,
        /// Replacement payload
        data: NodeData,
    },
    /// Remove a node and its incident edges
    RemoveNode(NodeId),
    /// Insert an edge
    AddEdge(Edge),
    /// Remove an edge
    RemoveEdge(EdgeId),
}

impl GraphCommand {
    /// Short command name for logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddNode(_) => "add_node",
            Self::UpdateNode { .. } => "update_node",
            Self::RemoveNode(_) => "remove_node",
            Self::AddEdge(_) => "add_edge",
            Self::RemoveEdge(_) => "remove_edge",
        }
    }
}

/// What a successfully applied command produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Node inserted
    NodeAdded(NodeId),
    /// Node data replaced
    NodeUpdated(NodeId),
    /// Node removed (returned for undo/audit)
    NodeRemoved(Node),
    /// Edge inserted
    EdgeAdded(EdgeId),
    /// Edge removed (returned for undo/audit)
    EdgeRemoved(Edge),
}

impl GraphStore {
    /// Apply a typed mutation command
    ///
    /// Equivalent to calling the corresponding store method directly; a
    /// failed command leaves the store unchanged.
    ///
    /// # Errors
    /// Propagates the underlying [`GraphError`].
    pub fn apply(&mut self, command: GraphCommand) -> Result<CommandOutcome, GraphError> {
        let name = command.name();
        let result = match command {
            GraphCommand::AddNode(node) => self.add_node(node).map(CommandOutcome::NodeAdded),
            GraphCommand::UpdateNode { id, data } => self
                .update_node(&id, data)
                .map(|()| CommandOutcome::NodeUpdated(id)),
            GraphCommand::RemoveNode(id) => {
                self.remove_node(&id).map(CommandOutcome::NodeRemoved)
            }
            GraphCommand::AddEdge(edge) => self.add_edge(edge).map(CommandOutcome::EdgeAdded),
            GraphCommand::RemoveEdge(id) => {
                self.remove_edge(&id).map(CommandOutcome::EdgeRemoved)
            }
        };
        match &result {
            Ok(_) => tracing::debug!(command = name, "command applied"),
            Err(err) => tracing::debug!(command = name, %err, "command rejected"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeType, Position};

    fn note(id: &str) -> Node {
        Node::with_id(id, NodeType::Note, Position::default(), NodeData::labeled(id))
    }

    #[test]
    fn apply_matches_direct_calls() {
        let mut direct = GraphStore::new();
        let mut bus = GraphStore::new();

        direct.add_node(note("a")).unwrap();
        direct.add_node(note("b")).unwrap();
        direct
            .add_edge(Edge::new("a", "b").with_label("cites"))
            .unwrap();
        direct.remove_node(&NodeId::new("a")).unwrap();

        bus.apply(GraphCommand::AddNode(note("a"))).unwrap();
        bus.apply(GraphCommand::AddNode(note("b"))).unwrap();
        bus.apply(GraphCommand::AddEdge(
            Edge::new("a", "b").with_label("cites"),
        ))
        .unwrap();
        bus.apply(GraphCommand::RemoveNode(NodeId::new("a"))).unwrap();

        assert_eq!(direct.node_count(), bus.node_count());
        assert_eq!(direct.edge_count(), bus.edge_count());
    }

    #[test]
    fn failed_command_leaves_store_unchanged() {
        let mut store = GraphStore::new();
        store.apply(GraphCommand::AddNode(note("a"))).unwrap();

        let err = store
            .apply(GraphCommand::AddEdge(Edge::new("a", "ghost")))
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidReference { .. }));
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn remove_outcomes_carry_the_removed_entity() {
        let mut store = GraphStore::new();
        store.apply(GraphCommand::AddNode(note("a"))).unwrap();
        store.apply(GraphCommand::AddNode(note("b"))).unwrap();
        let eid = match store
            .apply(GraphCommand::AddEdge(Edge::new("a", "b")))
            .unwrap()
        {
            CommandOutcome::EdgeAdded(id) => id,
            other => panic!("unexpected outcome: {other:?}"),
        };

        match store.apply(GraphCommand::RemoveEdge(eid)).unwrap() {
            CommandOutcome::EdgeRemoved(edge) => {
                assert_eq!(edge.source.as_str(), "a");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
