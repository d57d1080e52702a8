//! Graph-level and holistic validation rules, end to end through `compile`.

mod helpers;

use helpers::*;
use playbook_compiler::error::ErrorKind;
use playbook_compiler::{compile, compile_json};
use serde_json::json;

#[test]
fn edge_to_missing_node_is_fatal() {
    let json = include_str!("fixtures/unknown_edge.json");
    let failure = compile_json(json, &registry()).expect_err("should fail");
    assert!(failure.contains(ErrorKind::UnknownNodeReference));
    assert!(failure.errors[0].message.contains("'ghost'"));
}

#[test]
fn duplicate_edge_ids_fail_semantic_validation() {
    let json = include_str!("fixtures/duplicate_edge_ids.json");
    let failure = compile_json(json, &registry()).expect_err("should fail");
    assert!(failure.contains(ErrorKind::SemanticValidationFailed));
    assert!(
        failure
            .errors
            .iter()
            .any(|e| e.message.contains("Duplicate edge id 'e1'"))
    );
}

#[test]
fn duplicate_node_ids_fail_semantic_validation() {
    let g = graph(
        "dup nodes",
        vec![node("start", "webhook"), node("x", "noop"), node("x", "noop")],
        vec![],
    );
    let failure = compile(&g, &registry()).expect_err("should fail");
    assert!(failure.contains(ErrorKind::SemanticValidationFailed));
    assert!(
        failure
            .errors
            .iter()
            .any(|e| e.message.contains("Duplicate node id 'x'"))
    );
}

#[test]
fn incompatible_port_types_fail_with_suggestion() {
    // webhook event is json; http_request url expects text
    let g = graph(
        "type clash",
        vec![node("start", "webhook"), node("fetch", "http_request")],
        vec![connect("e1", "start", "event", "fetch", "url")],
    );
    let failure = compile(&g, &registry()).expect_err("should fail");
    assert!(failure.contains(ErrorKind::SemanticValidationFailed));
    let error = &failure.errors[0];
    assert!(error.message.contains("expects text"), "{}", error.message);
    assert!(error.message.contains("produces json"), "{}", error.message);
}

#[test]
fn entry_action_must_not_have_incoming_edges() {
    let g = graph(
        "looped entry",
        vec![node("start", "webhook"), node("t", "noop")],
        vec![edge("e1", "t", "start")],
    );
    let failure = compile(&g, &registry()).expect_err("should fail");
    assert!(failure.contains(ErrorKind::SemanticValidationFailed));
    assert!(
        failure
            .errors
            .iter()
            .any(|e| e.message.contains("must not have incoming edges"))
    );
}

#[test]
fn unreachable_node_is_a_warning_not_an_error() {
    let g = graph(
        "islands",
        vec![
            node("start", "webhook"),
            node("t1", "noop"),
            node("t2", "noop"),
        ],
        vec![edge("e1", "start", "t1")],
    );
    let output = compile(&g, &registry()).expect("should compile");
    assert_eq!(output.definition.actions.len(), 3);
    assert!(
        output
            .warnings
            .iter()
            .any(|w| w.node.as_deref() == Some("t2") && w.message.contains("not reachable"))
    );
}

#[test]
fn annotation_nodes_are_excluded_and_their_edges_warn() {
    let g = graph(
        "annotated",
        vec![
            node("start", "webhook"),
            node("t1", "noop"),
            node("note1", "note"),
        ],
        vec![edge("e1", "start", "t1"), edge("e2", "t1", "note1")],
    );
    let output = compile(&g, &registry()).expect("should compile");

    let refs: Vec<&str> = output
        .definition
        .actions
        .iter()
        .map(|a| a.ref_id.as_str())
        .collect();
    assert_eq!(refs, vec!["start", "t1"]);
    assert!(!output.definition.nodes.contains_key("note1"));
    assert!(
        output
            .warnings
            .iter()
            .any(|w| w.message.contains("presentation-only"))
    );
}

#[test]
fn unknown_component_is_fatal_and_named() {
    let g = graph(
        "unknown component",
        vec![node("start", "webhook"), node("mystery", "flux")],
        vec![],
    );
    let failure = compile(&g, &registry()).expect_err("should fail");
    assert!(failure.contains(ErrorKind::UnknownComponent));
    assert!(
        failure
            .errors
            .iter()
            .any(|e| e.node_id.as_deref() == Some("mystery") && e.message.contains("'flux'"))
    );
}

#[test]
fn unknown_handles_warn_but_do_not_block() {
    let g = graph(
        "loose handles",
        vec![node("start", "webhook"), node("t1", "noop")],
        vec![connect("e1", "start", "nope", "t1", "in")],
    );
    let output = compile(&g, &registry()).expect("should compile");
    assert!(
        output
            .warnings
            .iter()
            .any(|w| w.field.as_deref() == Some("nope"))
    );
    assert!(
        output
            .warnings
            .iter()
            .any(|w| w.field.as_deref() == Some("in"))
    );
}

#[test]
fn aggregated_failure_lists_every_error_line() {
    let g = graph(
        "many problems",
        vec![
            node("start", "webhook"),
            node("fetch", "http_request"),
            node_with_params("probe", "enrich_ip", json!({})),
        ],
        vec![],
    );
    // fetch.url and probe.address are both required and unsatisfied
    let failure = compile(&g, &registry()).expect_err("should fail");
    assert_eq!(failure.errors.len(), 2);
    let rendered = failure.to_string();
    assert!(rendered.contains("2 error(s)"));
    assert!(rendered.contains("'fetch'"));
    assert!(rendered.contains("'probe'"));
}
