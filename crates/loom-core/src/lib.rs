//! Loom Core - Canvas Engine
//!
//! The composition root of the knowledge canvas:
//! - Owns the graph store behind a single-writer lock
//! - Builds context bundles and drives the generation gateway
//! - Applies auto-link inference back onto the graph
//! - Runs batch transformations with progress and failure isolation
//! - Manages staged content and its promotion onto the canvas
//!
//! # Example
//!
//! ```rust,ignore
//! use loom_core::{CanvasEngine, EngineConfig};
//! use loom_graph::GraphCommand;
//!
//! # async fn example(gateway: std::sync::Arc<dyn loom_pipeline::GenerationGateway>) {
//! let engine = CanvasEngine::new(EngineConfig::new(), gateway);
//! engine.apply(GraphCommand::AddNode(note)).unwrap();
//! let text = engine.generate_for_node(&focal, "Summarize this").await.unwrap();
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod settings;
pub mod telemetry;

pub use config::EngineConfig;
pub use engine::CanvasEngine;
pub use error::EngineError;
pub use settings::{MemoryBackend, SettingsBackend, SettingsError, SettingsStore};
pub use telemetry::init_tracing;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the canvas engine
    pub use crate::{CanvasEngine, EngineConfig, EngineError, SettingsStore};
    pub use loom_autolink::InferenceOutcome;
    pub use loom_dispatch::BehaviorId;
    pub use loom_graph::{Edge, GraphCommand, Node, NodeData, NodeId, NodeType, Position};
    pub use loom_lifecycle::{LifecycleState, StagingItem, StagingKind};
    pub use loom_pipeline::{AbortSignal, BatchSummary, InstructionAction};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
