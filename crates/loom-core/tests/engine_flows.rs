//! End-to-end flows through the canvas engine

use loom_core::{CanvasEngine, EngineConfig};
use loom_graph::{Edge, EdgeStyle, GraphCommand, NodeId, Position};
use loom_lifecycle::{LifecycleState, StagingItem, StagingKind};
use loom_pipeline::{AbortSignal, InstructionAction, StepStatus};
use loom_test_utils::{fixed_now, note_node, staged_text, ScriptedGateway};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn engine() -> (CanvasEngine, Arc<ScriptedGateway>) {
    let gateway = Arc::new(ScriptedGateway::new());
    let config = EngineConfig::new().with_step_delay(Duration::from_millis(1));
    (CanvasEngine::new(config, gateway.clone()), gateway)
}

fn seed_triangle(engine: &CanvasEngine) {
    for id in ["f", "a", "b"] {
        engine.apply(GraphCommand::AddNode(note_node(id))).unwrap();
    }
    engine
        .apply(GraphCommand::AddEdge(Edge::new("f", "a")))
        .unwrap();
    engine
        .apply(GraphCommand::AddEdge(Edge::new("f", "b")))
        .unwrap();
}

#[tokio::test]
async fn selection_to_generation_flow() {
    let (engine, gateway) = engine();
    seed_triangle(&engine);
    gateway.push_text("a concise summary");

    let out = engine
        .generate_for_node(&NodeId::new("f"), "Summarize the neighborhood")
        .await
        .unwrap();
    assert_eq!(out, "a concise summary");

    let request = &gateway.requests()[0];
    assert_eq!(request.instruction, "Summarize the neighborhood");
    assert!(request.context_bundle.starts_with("## Notes"));
    assert!(request.context_bundle.contains("content of a"));
    assert!(request.context_bundle.contains("content of b"));
}

#[tokio::test]
async fn inferred_links_land_in_the_graph() {
    let (engine, gateway) = engine();
    seed_triangle(&engine);
    gateway.push_text(
        r#"Found these: {"edges":[
            {"source":"a","target":"b","label":"related"},
            {"source":"a","target":"ghost","label":"broken"}
        ]}"#,
    );

    let outcome = engine
        .infer_links(&NodeId::new("f"), "Suggest connections")
        .await
        .unwrap();

    assert_eq!(outcome.created.len(), 1);
    assert_eq!(outcome.rejected.len(), 1);

    let graph = engine.graph();
    let inferred: Vec<&Edge> = graph
        .edges()
        .filter(|e| e.style == EdgeStyle::Inferred)
        .collect();
    assert_eq!(inferred.len(), 1);
    assert_eq!(inferred[0].label.as_deref(), Some("related"));
}

#[tokio::test]
async fn malformed_generation_output_means_no_connections() {
    let (engine, gateway) = engine();
    seed_triangle(&engine);
    gateway.push_text("I couldn't find anything relevant, sorry.");

    let outcome = engine
        .infer_links(&NodeId::new("f"), "Suggest connections")
        .await
        .unwrap();

    assert!(outcome.is_empty());
    assert!(outcome.rejected.is_empty());
    assert_eq!(engine.graph().edge_count(), 2); // only the seeded edges
}

#[tokio::test]
async fn batch_reports_partial_success() {
    let (engine, gateway) = engine();
    for id in ["n1", "n2", "n3"] {
        engine.apply(GraphCommand::AddNode(note_node(id))).unwrap();
    }
    gateway.push_text("ok n1");
    gateway.push_error("rate limited");
    gateway.push_text("ok n3");

    let action = InstructionAction::new("rewrite", "Rewrite this node");
    let summary = engine
        .run_batch(
            vec!["n1".into(), "n2".into(), "n3".into()],
            &action,
            AbortSignal::new(),
        )
        .await;

    assert_eq!(summary.results.len(), 3);
    assert_eq!(summary.results[0].status, StepStatus::Success);
    assert_eq!(summary.results[1].status, StepStatus::Failure);
    assert_eq!(summary.results[2].status, StepStatus::Success);
    assert_eq!(summary.to_string(), "2 of 3 succeeded");

    // Calls were issued strictly in supply order.
    let contexts: Vec<String> = gateway
        .requests()
        .iter()
        .map(|r| r.context_bundle.clone())
        .collect();
    assert_eq!(
        contexts,
        vec![
            "N1: content of n1".to_string(),
            "N2: content of n2".to_string(),
            "N3: content of n3".to_string(),
        ]
    );
}

#[tokio::test]
async fn aborted_batch_stops_between_steps() {
    let (engine, gateway) = engine();
    for id in ["n1", "n2"] {
        engine.apply(GraphCommand::AddNode(note_node(id))).unwrap();
    }
    let signal = AbortSignal::new();
    signal.abort();

    let action = InstructionAction::new("rewrite", "Rewrite this node");
    let summary = engine
        .run_batch(vec!["n1".into(), "n2".into()], &action, signal)
        .await;

    assert!(summary.aborted);
    assert!(summary.results.is_empty());
    assert_eq!(gateway.call_count(), 0);
}

#[test]
fn staging_ages_and_promotes_onto_canvas() {
    let (engine, _) = engine();
    let now = fixed_now();

    engine.ingest_staging(staged_text("new", 1, now)).unwrap();
    engine.ingest_staging(staged_text("old", 9, now)).unwrap();
    engine
        .ingest_staging(
            StagingItem::new(StagingKind::Link, "https://example.org", now).with_id("url"),
        )
        .unwrap();

    let states: Vec<LifecycleState> = engine
        .staging_items(now)
        .into_iter()
        .map(|(_, state)| state)
        .collect();
    assert_eq!(
        states,
        vec![
            LifecycleState::Fresh,
            LifecycleState::Aging,
            LifecycleState::Fresh
        ]
    );

    let node_id = engine
        .promote_staging(&"url".into(), Position::new(100.0, 20.0))
        .unwrap();
    let graph = engine.graph();
    let node = graph.get_node(&node_id).unwrap();
    assert_eq!(node.data.url.as_deref(), Some("https://example.org"));
    drop(graph);

    // The staging record is consumed by promotion.
    assert_eq!(engine.staging_items(now).len(), 2);
}

#[test]
fn archive_restore_round_trip_through_engine() {
    let (engine, _) = engine();
    let now = fixed_now();

    engine.ingest_staging(staged_text("s1", 40, now)).unwrap();

    // 40 days old: archive-eligible on read, materialized by the sweep.
    let swept = engine.sweep_staging(now);
    assert_eq!(swept.len(), 1);

    let restored = engine.restore_staging(&swept[0], now).unwrap();
    assert_eq!(restored, "s1".into());

    let items = engine.staging_items(now);
    assert_eq!(items[0].1, LifecycleState::Fresh);
}
