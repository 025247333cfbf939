//! Loom Graph - Canvas Graph Model
//!
//! The canonical in-memory graph of the knowledge canvas:
//! - Typed, positioned content nodes
//! - Labeled, styled edges between them
//! - The [`GraphStore`] owning both, with referential integrity
//! - A typed [`GraphCommand`] bus for auditable mutation
//!
//! All mutation is synchronous. The store is never observable with an edge
//! whose endpoint is missing: edge creation validates both endpoints, and
//! node removal cascades to incident edges in the same call.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod command;
pub mod edge;
pub mod error;
pub mod ids;
pub mod node;
pub mod store;

pub use command::{CommandOutcome, GraphCommand};
pub use edge::{Edge, EdgeStyle};
pub use error::GraphError;
pub use ids::{AssetId, EdgeId, NodeId};
pub use node::{Node, NodeData, NodeType, Position};
pub use store::GraphStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
