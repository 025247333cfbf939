//! Auto-link payload parsing and application

use crate::extract::extract_first_json_object;
use loom_graph::{Edge, EdgeStyle, GraphStore, NodeId};
use serde::{Deserialize, Serialize};

/// Generation output did not contain a usable auto-link payload
///
/// Recoverable by contract: callers report "no connections found" instead
/// of propagating this as fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedResponseError {
    /// No balanced JSON object anywhere in the response
    #[error("no JSON object found in response")]
    NoJsonObject,

    /// An object was found but is not valid JSON
    #[error("response JSON is invalid: {0}")]
    InvalidJson(String),

    /// Valid JSON, wrong shape for the auto-link payload
    #[error("response JSON does not match the auto-link payload: {0}")]
    WrongShape(String),
}

/// Wire payload produced by the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPayload {
    /// Candidate edges
    pub edges: Vec<LinkCandidate>,
}

/// One candidate connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCandidate {
    /// Claimed source node id
    pub source: String,
    /// Claimed target node id
    pub target: String,
    /// Short relationship label
    #[serde(default)]
    pub label: String,
}

/// Why a candidate was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Source id does not exist in the store
    UnknownSource,
    /// Target id does not exist in the store
    UnknownTarget,
    /// Candidate links a node to itself
    SelfLink,
    /// The store rejected the insertion
    StoreRejected,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::UnknownSource => "unknown source node",
            Self::UnknownTarget => "unknown target node",
            Self::SelfLink => "self-link",
            Self::StoreRejected => "store rejected edge",
        };
        write!(f, "{s}")
    }
}

/// A candidate that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEdge {
    /// The rejected candidate
    pub candidate: LinkCandidate,
    /// Why it was rejected
    pub reason: RejectReason,
}

/// Result of one inference pass
#[derive(Debug, Clone, Default)]
pub struct InferenceOutcome {
    /// Edges applied to the store, in payload order
    pub created: Vec<Edge>,
    /// Candidates that failed validation, in payload order
    pub rejected: Vec<RejectedEdge>,
}

impl InferenceOutcome {
    /// Whether nothing was applied
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }

    /// User-facing summary, e.g. "2 connections created, 1 rejected"
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} connections created, {} rejected",
            self.created.len(),
            self.rejected.len()
        )
    }
}

/// Parses auto-link payloads out of raw generation output and applies them
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoLinkInferencer;

impl AutoLinkInferencer {
    /// Create an inferencer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse the payload out of raw response text without applying it
    ///
    /// # Errors
    /// [`MalformedResponseError`] when no payload can be recovered.
    pub fn parse(&self, raw: &str) -> Result<LinkPayload, MalformedResponseError> {
        let object =
            extract_first_json_object(raw).ok_or(MalformedResponseError::NoJsonObject)?;
        let value: serde_json::Value = serde_json::from_str(object)
            .map_err(|e| MalformedResponseError::InvalidJson(e.to_string()))?;
        serde_json::from_value(value)
            .map_err(|e| MalformedResponseError::WrongShape(e.to_string()))
    }

    /// Parse `raw` and apply every valid candidate to the store
    ///
    /// Candidates referencing unknown nodes (and self-links) are collected
    /// into `rejected` rather than aborting the batch. Applied edges carry
    /// [`EdgeStyle::Inferred`] so the UI can tell them apart from
    /// user-drawn ones.
    ///
    /// # Errors
    /// [`MalformedResponseError`] when the response held no payload at
    /// all; individual candidate failures are not errors.
    pub fn infer(
        &self,
        raw: &str,
        store: &mut GraphStore,
    ) -> Result<InferenceOutcome, MalformedResponseError> {
        let payload = self.parse(raw)?;
        let mut outcome = InferenceOutcome::default();

        for candidate in payload.edges {
            let reason = if candidate.source == candidate.target {
                Some(RejectReason::SelfLink)
            } else if !store.contains_node(&NodeId::new(candidate.source.as_str())) {
                Some(RejectReason::UnknownSource)
            } else if !store.contains_node(&NodeId::new(candidate.target.as_str())) {
                Some(RejectReason::UnknownTarget)
            } else {
                None
            };

            if let Some(reason) = reason {
                tracing::debug!(
                    source = %candidate.source,
                    target = %candidate.target,
                    %reason,
                    "auto-link candidate rejected"
                );
                outcome.rejected.push(RejectedEdge { candidate, reason });
                continue;
            }

            let mut edge = Edge::new(candidate.source.as_str(), candidate.target.as_str())
                .with_style(EdgeStyle::Inferred);
            let label = candidate.label.trim();
            if !label.is_empty() {
                edge = edge.with_label(label);
            }

            // Endpoints were checked above and nothing can interleave in a
            // synchronous mutation, so this only fails on an id collision.
            match store.add_edge(edge.clone()) {
                Ok(_) => outcome.created.push(edge),
                Err(err) => {
                    tracing::warn!(%err, "auto-link application failed");
                    outcome.rejected.push(RejectedEdge {
                        candidate,
                        reason: RejectReason::StoreRejected,
                    });
                }
            }
        }

        tracing::info!(
            created = outcome.created.len(),
            rejected = outcome.rejected.len(),
            "auto-link inference applied"
        );
        Ok(outcome)
    }
}
