//! Loom Autolink - Inferred Connections
//!
//! Turns a generation service's structured output back into graph
//! mutations:
//! - Locates the first top-level JSON object in free-form response text
//!   (generation output is not guaranteed to be pure JSON)
//! - Parses it as the auto-link payload `{ "edges": [...] }`
//! - Validates each candidate against the store and applies the valid ones
//!   as [`EdgeStyle::Inferred`](loom_graph::EdgeStyle) edges
//!
//! Partial success is the normal case: bad candidates land in `rejected`,
//! never abort the batch. An unparseable response is a typed, recoverable
//! [`MalformedResponseError`] — callers surface "no connections found".

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod extract;
pub mod inferencer;

pub use extract::extract_first_json_object;
pub use inferencer::{
    AutoLinkInferencer, InferenceOutcome, LinkCandidate, LinkPayload, MalformedResponseError,
    RejectReason, RejectedEdge,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
