//! The canvas engine
//!
//! Single-writer composition root over the graph store, context
//! aggregation, dispatch, auto-link inference, the batch pipeline and the
//! staging lifecycle. Everything but the gateway calls is synchronous;
//! locks are never held across an await, so any synchronous reader
//! observes a consistent graph.

use crate::config::EngineConfig;
use crate::error::EngineError;
use chrono::{DateTime, Utc};
use loom_autolink::{AutoLinkInferencer, InferenceOutcome};
use loom_context::{ContextAggregator, ContextBundle};
use loom_dispatch::{BehaviorId, ProcessorRegistry};
use loom_graph::{CommandOutcome, GraphCommand, GraphError, GraphStore, Node, NodeId, Position};
use loom_lifecycle::{
    ArchiveId, LifecycleManager, LifecycleState, StagingId, StagingItem,
};
use loom_pipeline::{
    AbortSignal, BatchPipelineRunner, BatchSummary, GenerationGateway, GenerationRequest,
    ResponseFormat, TransformAction,
};
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// The central orchestrator of one canvas session
pub struct CanvasEngine {
    config: EngineConfig,
    gateway: Arc<dyn GenerationGateway>,
    graph: RwLock<GraphStore>,
    lifecycle: RwLock<LifecycleManager>,
    aggregator: ContextAggregator,
    registry: ProcessorRegistry,
    inferencer: AutoLinkInferencer,
    runner: BatchPipelineRunner,
}

impl CanvasEngine {
    /// Create an engine over a generation gateway
    #[must_use]
    pub fn new(config: EngineConfig, gateway: Arc<dyn GenerationGateway>) -> Self {
        let aggregator = ContextAggregator::new().with_max_depth(config.max_context_depth);
        let registry = ProcessorRegistry::with_defaults().with_fallback(config.fallback_behavior);
        let runner =
            BatchPipelineRunner::new(gateway.clone()).with_step_delay(config.step_delay);
        Self {
            config,
            gateway,
            graph: RwLock::new(GraphStore::new()),
            lifecycle: RwLock::new(LifecycleManager::new()),
            aggregator,
            registry,
            inferencer: AutoLinkInferencer::new(),
            runner,
        }
    }

    /// With a custom capability registry
    #[inline]
    #[must_use]
    pub fn with_registry(mut self, registry: ProcessorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ---- graph -----------------------------------------------------------

    /// Read access to the graph
    ///
    /// The guard must not be held across an await point.
    #[must_use]
    pub fn graph(&self) -> RwLockReadGuard<'_, GraphStore> {
        self.graph.read()
    }

    /// Apply a typed mutation command
    ///
    /// # Errors
    /// Propagates the graph's rejection; the store is unchanged then.
    pub fn apply(&self, command: GraphCommand) -> Result<CommandOutcome, EngineError> {
        Ok(self.graph.write().apply(command)?)
    }

    /// Clone of a node, if present
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<Node> {
        self.graph.read().get_node(id).cloned()
    }

    // ---- dispatch --------------------------------------------------------

    /// All behaviors applicable to a node, in registration order
    ///
    /// # Errors
    /// `GraphError::NodeNotFound` for an unknown id.
    pub fn behaviors_for(&self, id: &NodeId) -> Result<Vec<BehaviorId>, EngineError> {
        let graph = self.graph.read();
        let node = graph
            .get_node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        Ok(self.registry.resolve(node))
    }

    /// Default-active behavior for the current selection
    #[must_use]
    pub fn default_behavior(&self, selection: Option<&NodeId>) -> Option<BehaviorId> {
        match selection {
            Some(id) => {
                let graph = self.graph.read();
                self.registry.resolve_default(graph.get_node(id))
            }
            None => self.registry.resolve_default(None),
        }
    }

    // ---- generation ------------------------------------------------------

    /// Build the context bundle for a focal node
    ///
    /// # Errors
    /// `ContextError::FocalNodeNotFound` for an unknown id.
    pub fn build_context(&self, focal: &NodeId) -> Result<ContextBundle, EngineError> {
        Ok(self.aggregator.build_context(&self.graph.read(), focal)?)
    }

    /// Run one generation against a focal node's neighborhood
    ///
    /// # Errors
    /// Context errors for an unknown focal node, gateway errors from the
    /// collaborator.
    pub async fn generate_for_node(
        &self,
        focal: &NodeId,
        instruction: impl Into<String>,
    ) -> Result<String, EngineError> {
        let context = self.build_context(focal)?.render();
        let request = GenerationRequest::new(instruction, context);
        Ok(self.gateway.generate(request).await?)
    }

    /// Ask the gateway for connections around a focal node and apply them
    ///
    /// A response without a usable payload is not an error: it yields an
    /// empty outcome, which callers render as "no connections found".
    ///
    /// # Errors
    /// Context errors for an unknown focal node, gateway errors from the
    /// collaborator.
    pub async fn infer_links(
        &self,
        focal: &NodeId,
        instruction: impl Into<String>,
    ) -> Result<InferenceOutcome, EngineError> {
        let context = self.build_context(focal)?.render();
        let request =
            GenerationRequest::new(instruction, context).with_format(ResponseFormat::Json);
        let raw = self.gateway.generate(request).await?;

        match self.inferencer.infer(&raw, &mut self.graph.write()) {
            Ok(outcome) => Ok(outcome),
            // Every malformed-response shape recovers to "no connections
            // found" rather than failing the user's request.
            Err(err) => {
                tracing::info!(%err, "no connections found in generation output");
                Ok(InferenceOutcome::default())
            }
        }
    }

    /// Run a batch transformation over the supplied nodes
    ///
    /// The batch reads a snapshot of the graph taken at start; outputs are
    /// returned to the caller, which decides what to write back.
    pub async fn run_batch(
        &self,
        node_ids: Vec<NodeId>,
        action: &dyn TransformAction,
        signal: AbortSignal,
    ) -> BatchSummary {
        let snapshot = self.graph.read().clone();
        self.runner
            .run_collect(&snapshot, node_ids, action, signal)
            .await
    }

    // ---- staging ---------------------------------------------------------

    /// Ingest a staging item
    ///
    /// # Errors
    /// Duplicate ids are rejected.
    pub fn ingest_staging(&self, item: StagingItem) -> Result<StagingId, EngineError> {
        Ok(self.lifecycle.write().ingest(item)?)
    }

    /// Staged items with their state as observed at `now`
    #[must_use]
    pub fn staging_items(&self, now: DateTime<Utc>) -> Vec<(StagingItem, LifecycleState)> {
        self.lifecycle
            .read()
            .list(now)
            .into_iter()
            .map(|(item, state)| (item.clone(), state))
            .collect()
    }

    /// Explicitly archive a staged item
    ///
    /// # Errors
    /// Unknown or already-archived items are rejected.
    pub fn archive_staging(
        &self,
        id: &StagingId,
        now: DateTime<Utc>,
    ) -> Result<ArchiveId, EngineError> {
        Ok(self.lifecycle.write().archive(id, now)?)
    }

    /// Restore an archived snapshot
    ///
    /// # Errors
    /// `LifecycleError::OrphanedArchive` when the back-reference is
    /// broken; other items are unaffected either way.
    pub fn restore_staging(
        &self,
        archive_id: &ArchiveId,
        now: DateTime<Utc>,
    ) -> Result<StagingId, EngineError> {
        Ok(self.lifecycle.write().restore(archive_id, now)?)
    }

    /// Materialize snapshots for items aged past the archive threshold
    pub fn sweep_staging(&self, now: DateTime<Utc>) -> Vec<ArchiveId> {
        self.lifecycle.write().sweep(now)
    }

    /// Promote a staged item onto the canvas
    ///
    /// The staging record is consumed; the resulting node is added to the
    /// graph at `position`.
    ///
    /// # Errors
    /// Unknown staging ids and graph rejections propagate.
    pub fn promote_staging(
        &self,
        id: &StagingId,
        position: Position,
    ) -> Result<NodeId, EngineError> {
        let promoted = self.lifecycle.write().promote(id, position)?;
        let node_id = self.graph.write().add_node(promoted.node)?;
        tracing::info!(item = %id, node = %node_id, "staged item promoted onto canvas");
        Ok(node_id)
    }
}

impl std::fmt::Debug for CanvasEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasEngine")
            .field("config", &self.config)
            .field("nodes", &self.graph.read().node_count())
            .field("staged", &self.lifecycle.read().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loom_graph::{NodeData, NodeType};
    use loom_test_utils::{note_node, ScriptedGateway};

    fn engine_with_gateway() -> (CanvasEngine, Arc<ScriptedGateway>) {
        let gateway = Arc::new(ScriptedGateway::new());
        let engine = CanvasEngine::new(EngineConfig::new(), gateway.clone());
        (engine, gateway)
    }

    #[test]
    fn apply_routes_through_the_graph() {
        let (engine, _) = engine_with_gateway();
        engine
            .apply(GraphCommand::AddNode(note_node("a")))
            .unwrap();
        assert!(engine.node(&"a".into()).is_some());

        let err = engine
            .apply(GraphCommand::RemoveNode("ghost".into()))
            .unwrap_err();
        assert!(matches!(err, EngineError::Graph(GraphError::NodeNotFound(_))));
    }

    #[test]
    fn behaviors_for_unknown_node_is_an_error() {
        let (engine, _) = engine_with_gateway();
        let err = engine.behaviors_for(&"ghost".into()).unwrap_err();
        assert!(matches!(err, EngineError::Graph(GraphError::NodeNotFound(_))));
    }

    #[test]
    fn default_behavior_without_selection_is_fallback() {
        let (engine, _) = engine_with_gateway();
        assert_eq!(
            engine.default_behavior(None),
            Some(ProcessorRegistry::FALLBACK)
        );
    }

    #[tokio::test]
    async fn generate_sends_rendered_context() {
        let (engine, gateway) = engine_with_gateway();
        engine
            .apply(GraphCommand::AddNode(note_node("f")))
            .unwrap();
        engine
            .apply(GraphCommand::AddNode(note_node("a")))
            .unwrap();
        engine
            .apply(GraphCommand::AddEdge(loom_graph::Edge::new("f", "a")))
            .unwrap();
        gateway.push_text("summary text");

        let out = engine
            .generate_for_node(&"f".into(), "Summarize")
            .await
            .unwrap();
        assert_eq!(out, "summary text");

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].context_bundle.contains("content of a"));
        assert!(!requests[0].context_bundle.contains("content of f"));
    }

    #[test]
    fn debug_formats_counts() {
        let (engine, _) = engine_with_gateway();
        engine
            .apply(GraphCommand::AddNode(Node::with_id(
                "n",
                NodeType::Note,
                Position::default(),
                NodeData::labeled("n"),
            )))
            .unwrap();
        let formatted = format!("{engine:?}");
        assert!(formatted.contains("nodes"));
    }
}
