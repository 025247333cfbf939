//! Error types for graph mutation

use crate::ids::{EdgeId, NodeId};

/// Graph mutation errors
///
/// All variants are local and recoverable: a rejected mutation leaves the
/// store untouched, and never a dangling edge behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Edge endpoint does not reference an existing node
    #[error("invalid reference: edge endpoint {endpoint} does not exist")]
    InvalidReference {
        /// The missing endpoint id
        endpoint: NodeId,
    },

    /// Node not found
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Edge not found
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// Id already present in the store
    #[error("duplicate id: {0}")]
    DuplicateId(String),
}

impl GraphError {
    /// Create an invalid-reference error for a missing endpoint
    #[inline]
    #[must_use]
    pub fn invalid_reference(endpoint: impl Into<NodeId>) -> Self {
        Self::InvalidReference {
            endpoint: endpoint.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GraphError::invalid_reference("ghost");
        assert!(err.to_string().contains("invalid reference"));
        assert!(err.to_string().contains("ghost"));

        let err = GraphError::NodeNotFound(NodeId::new("n1"));
        assert!(err.to_string().contains("node not found"));
    }
}
