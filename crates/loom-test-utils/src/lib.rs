//! Testing utilities for the Loom workspace
//!
//! Shared graph fixtures, staging fixtures, and a scripted generation
//! gateway double.

#![allow(missing_docs)]

use chrono::{DateTime, Duration, Utc};
use loom_graph::{Edge, GraphStore, Node, NodeData, NodeType, Position};
use loom_lifecycle::{StagingItem, StagingKind};
use loom_pipeline::{GatewayError, GenerationGateway, GenerationRequest};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// A note node with content derived from its id.
pub fn note_node(id: &str) -> Node {
    Node::with_id(
        id,
        NodeType::Note,
        Position::default(),
        NodeData::labeled(id.to_uppercase()).with_content(format!("content of {id}")),
    )
}

pub fn link_node(id: &str, url: &str) -> Node {
    Node::with_id(
        id,
        NodeType::Link,
        Position::default(),
        NodeData::labeled(id.to_uppercase()).with_url(url),
    )
}

pub fn media_node(id: &str) -> Node {
    Node::with_id(
        id,
        NodeType::Media,
        Position::default(),
        NodeData::labeled(id.to_uppercase()),
    )
}

pub fn analysis_node(id: &str, result: &str) -> Node {
    Node::with_id(
        id,
        NodeType::Analysis,
        Position::default(),
        NodeData::labeled(id.to_uppercase()).with_content(result),
    )
}

/// Note nodes connected in a chain: `ids[0] - ids[1] - ... - ids[n]`.
pub fn chain_graph(ids: &[&str]) -> GraphStore {
    let mut store = GraphStore::new();
    for id in ids {
        store.add_node(note_node(id)).unwrap();
    }
    for pair in ids.windows(2) {
        store.add_edge(Edge::new(pair[0], pair[1])).unwrap();
    }
    store
}

/// A center note node with leaves attached directly to it.
pub fn star_graph(center: &str, leaves: &[&str]) -> GraphStore {
    let mut store = GraphStore::new();
    store.add_node(note_node(center)).unwrap();
    for leaf in leaves {
        store.add_node(note_node(leaf)).unwrap();
        store.add_edge(Edge::new(center, *leaf)).unwrap();
    }
    store
}

/// A text staging item last touched `age_days` before `now`.
pub fn staged_text(id: &str, age_days: i64, now: DateTime<Utc>) -> StagingItem {
    StagingItem::new(
        StagingKind::Text,
        format!("staged {id}"),
        now - Duration::days(age_days),
    )
    .with_id(id)
}

/// A fixed reference instant for deterministic lifecycle tests.
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-08-07T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Scripted generation gateway.
///
/// Pops canned responses in push order and records every request. With an
/// empty script it echoes the instruction, which keeps simple tests free
/// of setup.
#[derive(Default)]
pub struct ScriptedGateway {
    script: Mutex<VecDeque<Result<String, GatewayError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn push_text(&self, text: impl Into<String>) {
        self.script.lock().push_back(Ok(text.into()));
    }

    /// Queue an upstream failure.
    pub fn push_error(&self, message: impl Into<String>) {
        self.script
            .lock()
            .push_back(Err(GatewayError::Upstream(message.into())));
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }

    /// Number of calls issued.
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait::async_trait]
impl GenerationGateway for ScriptedGateway {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GatewayError> {
        self.requests.lock().push(request.clone());
        match self.script.lock().pop_front() {
            Some(response) => response,
            None => Ok(format!("echo: {}", request.instruction)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_graph_wires_consecutive_nodes() {
        let store = chain_graph(&["a", "b", "c"]);
        assert_eq!(store.node_count(), 3);
        assert_eq!(store.edge_count(), 2);
        assert_eq!(store.neighbors(&"b".into()).len(), 2);
    }

    #[test]
    fn star_graph_centers_edges() {
        let store = star_graph("hub", &["x", "y", "z"]);
        assert_eq!(store.neighbors(&"hub".into()).len(), 3);
    }

    #[tokio::test]
    async fn scripted_gateway_pops_in_order_then_echoes() {
        let gateway = ScriptedGateway::new();
        gateway.push_text("first");
        gateway.push_error("down");

        let ok = gateway
            .generate(GenerationRequest::new("i1", "c1"))
            .await
            .unwrap();
        assert_eq!(ok, "first");

        let err = gateway
            .generate(GenerationRequest::new("i2", "c2"))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Upstream("down".to_string()));

        let echo = gateway
            .generate(GenerationRequest::new("i3", "c3"))
            .await
            .unwrap();
        assert_eq!(echo, "echo: i3");
        assert_eq!(gateway.call_count(), 3);
    }
}
