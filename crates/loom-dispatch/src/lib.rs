//! Loom Dispatch - Capability Registry
//!
//! Maps node types to the processing behaviors that apply to them:
//! - Ordered `(predicate, behavior, display name)` registrations
//! - [`ProcessorRegistry::resolve`] returns every match, registration
//!   order preserved (the first match is the default-active behavior)
//! - A designated fallback behavior for the nothing-selected case
//!
//! Registration is static configuration: predicates are pure `fn` pointers
//! over a node's static fields, never derived from content and never
//! side-effecting. Overlapping matches are intentional, not an error.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod registry;

pub use registry::{BehaviorId, ProcessorRegistry, Registration};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
