//! Engine-level error composition

use loom_context::ContextError;
use loom_graph::GraphError;
use loom_lifecycle::LifecycleError;
use loom_pipeline::GatewayError;

/// Errors surfaced by the canvas engine
///
/// Each variant wraps one collaborator's taxonomy. Errors local to a
/// single node, edge or batch step are handled below this level and never
/// reach it; what does reach it is still recoverable by the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Graph mutation rejected
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// Context aggregation failed
    #[error("context error: {0}")]
    Context(#[from] ContextError),

    /// Generation collaborator failed
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Lifecycle operation rejected
    #[error("lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use loom_graph::NodeId;

    #[test]
    fn conversions_compose() {
        let err: EngineError = GraphError::NodeNotFound(NodeId::new("n")).into();
        assert!(matches!(err, EngineError::Graph(_)));
        assert!(err.to_string().contains("node not found"));

        let err: EngineError = GatewayError::Upstream("down".to_string()).into();
        assert!(matches!(err, EngineError::Gateway(_)));
    }
}
