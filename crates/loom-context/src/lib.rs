//! Loom Context - Neighborhood Aggregation
//!
//! Builds the serialized context bundle a generation request reads:
//! - Undirected breadth-first traversal outward from a focal node
//! - Visited-set so cyclic graphs terminate and no node projects twice
//! - Type-specific textual projections, grouped into fixed-priority
//!   categories
//! - Deterministic rendering: the same graph yields byte-identical output
//!
//! Bundles are ephemeral and never persisted.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod aggregator;
pub mod bundle;
pub mod projection;

pub use aggregator::{ContextAggregator, ContextError, DEFAULT_DEPTH};
pub use bundle::ContextBundle;
pub use projection::{project, Projection, ProjectionCategory};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
