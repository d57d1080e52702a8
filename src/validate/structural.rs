//! Structural rules over the source graph and the compiled definition.

use std::collections::HashSet;

use petgraph::visit::Bfs;

use crate::definition::WorkflowDefinition;
use crate::graph::DependencyGraph;
use crate::normalize::ExecutableView;
use crate::parse::types::Graph;

use super::ValidationIssue;

/// Run all structural rules, pushing into the shared error/warning lists.
pub fn validate_structural(
    graph: &Graph,
    view: &ExecutableView<'_>,
    deps: &DependencyGraph,
    definition: &WorkflowDefinition,
    errors: &mut Vec<ValidationIssue>,
    warnings: &mut Vec<ValidationIssue>,
) {
    unique_node_ids(graph, errors);
    unique_edge_ids(graph, errors);
    duplicate_connections(graph, warnings);
    severed_annotation_edges(view, warnings);
    entry_has_no_incoming(definition, errors);
    unreachable_from_entry(deps, definition, warnings);
}

fn unique_node_ids(graph: &Graph, errors: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    for node in &graph.nodes {
        if !seen.insert(node.id.as_str()) {
            errors.push(
                ValidationIssue::new(
                    Some(node.id.clone()),
                    None,
                    format!("Duplicate node id '{}'", node.id),
                )
                .with_suggestion("node ids must be unique within a workflow"),
            );
        }
    }
}

fn unique_edge_ids(graph: &Graph, errors: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    for edge in &graph.edges {
        if !seen.insert(edge.id.as_str()) {
            errors.push(
                ValidationIssue::new(None, None, format!("Duplicate edge id '{}'", edge.id))
                    .with_suggestion("edge ids must be unique within a workflow"),
            );
        }
    }
}

fn duplicate_connections(graph: &Graph, warnings: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    for edge in &graph.edges {
        let key = (
            edge.source.as_str(),
            edge.target.as_str(),
            edge.source_handle.as_deref(),
            edge.target_handle.as_deref(),
        );
        if !seen.insert(key) {
            warnings.push(ValidationIssue::new(
                None,
                None,
                format!(
                    "Duplicate connection from '{}' to '{}'",
                    edge.source, edge.target
                ),
            ));
        }
    }
}

fn severed_annotation_edges(view: &ExecutableView<'_>, warnings: &mut Vec<ValidationIssue>) {
    for edge in &view.severed_edges {
        warnings.push(
            ValidationIssue::new(
                None,
                None,
                format!(
                    "Edge '{}' connects a presentation-only node and was ignored",
                    edge.id
                ),
            )
            .with_suggestion("remove the edge; annotation nodes are never scheduled"),
        );
    }
}

fn entry_has_no_incoming(definition: &WorkflowDefinition, errors: &mut Vec<ValidationIssue>) {
    let entry = &definition.entrypoint.ref_id;
    if definition.dependency_counts.get(entry).copied().unwrap_or(0) > 0 {
        errors.push(
            ValidationIssue::new(
                Some(entry.clone()),
                None,
                format!("Entry action '{}' must not have incoming edges", entry),
            )
            .with_suggestion("remove the edges targeting the entry node"),
        );
    }
}

fn unreachable_from_entry(
    deps: &DependencyGraph,
    definition: &WorkflowDefinition,
    warnings: &mut Vec<ValidationIssue>,
) {
    let Some(&entry_idx) = deps.node_indices.get(&definition.entrypoint.ref_id) else {
        return;
    };

    let mut reachable = HashSet::new();
    let mut bfs = Bfs::new(&deps.graph, entry_idx);
    while let Some(ix) = bfs.next(&deps.graph) {
        reachable.insert(ix);
    }

    for action in &definition.actions {
        let Some(&idx) = deps.node_indices.get(&action.ref_id) else {
            continue;
        };
        if !reachable.contains(&idx) {
            warnings.push(ValidationIssue::new(
                Some(action.ref_id.clone()),
                None,
                format!(
                    "Node '{}' is not reachable from the entry action and may never run",
                    action.ref_id
                ),
            ));
        }
    }
}
