//! Lowering phase: executable view → WorkflowDefinition.
//!
//! Walks the topologically sorted node list, resolves each node's effective
//! ports, reconciles inputs against manual values, splits off scheduling
//! metadata, and assembles the final definition.

pub mod entry;
pub mod inputs;
pub mod metadata;
pub mod topo;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::definition::{
    CompiledEdge, DEFINITION_VERSION, WorkflowAction, WorkflowDefinition,
};
use crate::error::{CompilerError, ErrorKind};
use crate::graph::DependencyGraph;
use crate::normalize::ExecutableView;
use crate::parse::types::{Graph, Node};
use crate::ports::PortSet;
use crate::registry::{ComponentRegistry, ComponentSpec};
use crate::validate::ValidationIssue;

/// Lower a normalized graph into a workflow definition. Also returns each
/// node's resolved port set for the holistic validator.
pub fn lower(
    graph: &Graph,
    view: &ExecutableView<'_>,
    deps: &DependencyGraph,
    registry: &dyn ComponentRegistry,
    warnings: &mut Vec<ValidationIssue>,
) -> Result<(WorkflowDefinition, HashMap<String, PortSet>), Vec<CompilerError>> {
    // 1. Topological sort
    let order = topo::topo_sort(deps)?;

    let node_map: HashMap<&str, &Node> = view.nodes.iter().map(|n| (n.id.as_str(), *n)).collect();

    // 2. Every executable node must resolve in the registry
    let unknown: Vec<CompilerError> = order
        .iter()
        .filter_map(|id| node_map.get(id.as_str()))
        .filter(|node| registry.get(&node.component).is_none())
        .map(|node| {
            CompilerError::lower(
                ErrorKind::UnknownComponent,
                format!(
                    "Node '{}' references unknown component '{}'",
                    node.id, node.component
                ),
                Some(node.id.clone()),
            )
        })
        .collect();
    if !unknown.is_empty() {
        return Err(unknown);
    }

    // 3. Effective port set per node, static or dynamically resolved
    let mut ports_by_node: HashMap<String, PortSet> = HashMap::new();
    for id in &order {
        let Some(node) = node_map.get(id.as_str()) else {
            continue;
        };
        let Some(spec) = registry.get(&node.component) else {
            continue;
        };
        ports_by_node.insert(node.id.clone(), resolve_ports(node, spec, warnings));
    }

    // 4. Compile actions in topological order, collecting every error
    let mut actions = Vec::with_capacity(order.len());
    let mut errors = Vec::new();
    for id in &order {
        let Some(node) = node_map.get(id.as_str()) else {
            continue;
        };
        let Some(ports) = ports_by_node.get(id.as_str()) else {
            continue;
        };
        let incoming = deps.incoming_edges(id);

        match inputs::resolve_inputs(node, ports, &incoming, warnings) {
            Ok(resolved) => {
                let depends_on: BTreeSet<String> =
                    incoming.iter().map(|(source, _)| source.to_string()).collect();
                actions.push(WorkflowAction {
                    ref_id: node.id.clone(),
                    component_id: node.component.clone(),
                    params: resolved.params,
                    input_overrides: resolved.input_overrides,
                    depends_on,
                    input_mappings: resolved.mappings,
                });
            }
            Err(node_errors) => errors.extend(node_errors),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    // 5. Scheduling metadata, split off from params
    let mut nodes = BTreeMap::new();
    for id in &order {
        let Some(node) = node_map.get(id.as_str()) else {
            continue;
        };
        let (node_metadata, metadata_warnings) = metadata::compile_node_metadata(node);
        warnings.extend(metadata_warnings);
        nodes.insert(node.id.clone(), node_metadata);
    }

    // 6. Entry point
    let entrypoint = entry::resolve_entrypoint(&actions, registry)?;

    // 7. Assemble
    let dependency_counts: BTreeMap<String, usize> = actions
        .iter()
        .map(|a| (a.ref_id.clone(), a.depends_on.len()))
        .collect();
    let edges: Vec<CompiledEdge> = view
        .edges
        .iter()
        .map(|e| CompiledEdge {
            id: e.id.clone(),
            source: e.source.clone(),
            target: e.target.clone(),
            source_handle: e.source_handle.clone(),
            target_handle: e.target_handle.clone(),
        })
        .collect();

    let definition = WorkflowDefinition {
        version: DEFINITION_VERSION,
        title: graph.name.clone(),
        description: graph.description.clone(),
        entrypoint,
        nodes,
        edges,
        dependency_counts,
        actions,
        config: graph.config.clone(),
    };

    Ok((definition, ports_by_node))
}

/// A misbehaving resolver must not abort compilation of the whole graph:
/// failures downgrade to a warning and the static port list wins.
fn resolve_ports(
    node: &Node,
    spec: &ComponentSpec,
    warnings: &mut Vec<ValidationIssue>,
) -> PortSet {
    let Some(resolver) = &spec.resolve_ports else {
        return spec.static_ports();
    };

    match (resolver.as_ref())(&node.data.config.params) {
        Ok(ports) => ports,
        Err(err) => {
            tracing::warn!(
                node = %node.id,
                component = %spec.id,
                error = %err,
                "dynamic port resolution failed; falling back to static metadata"
            );
            warnings.push(ValidationIssue::new(
                Some(node.id.clone()),
                None,
                format!(
                    "Dynamic port resolution failed for component '{}' on node '{}' ({}); static port metadata was used instead",
                    spec.id, node.id, err
                ),
            ));
            spec.static_ports()
        }
    }
}
