//! Executable view of a graph: presentation-only nodes filtered out.
//!
//! Compilation operates on a view; the visual graph itself is never mutated.

use std::collections::HashSet;

use crate::parse::types::{Edge, Graph, Node};
use crate::registry::ComponentRegistry;

pub struct ExecutableView<'g> {
    /// Schedulable nodes, in declaration order.
    pub nodes: Vec<&'g Node>,
    /// Edges whose endpoints both survived filtering.
    pub edges: Vec<&'g Edge>,
    /// Edges dropped because one endpoint is a presentation-only node.
    pub severed_edges: Vec<&'g Edge>,
    /// Ids of the presentation-only nodes excluded from scheduling.
    pub annotation_ids: HashSet<String>,
}

/// Project the executable subset of a graph. Nodes with an unknown component
/// type stay in the view so the unknown-component check can name them instead
/// of silently dropping work.
pub fn executable_view<'g>(
    graph: &'g Graph,
    registry: &dyn ComponentRegistry,
) -> ExecutableView<'g> {
    let mut nodes = Vec::new();
    let mut annotation_ids = HashSet::new();

    for node in &graph.nodes {
        match registry.get(&node.component) {
            Some(spec) if spec.is_presentation() => {
                tracing::debug!(node = %node.id, component = %node.component, "excluding presentation node");
                annotation_ids.insert(node.id.clone());
            }
            _ => nodes.push(node),
        }
    }

    let mut edges = Vec::new();
    let mut severed_edges = Vec::new();
    for edge in &graph.edges {
        if annotation_ids.contains(&edge.source) || annotation_ids.contains(&edge.target) {
            severed_edges.push(edge);
        } else {
            edges.push(edge);
        }
    }

    ExecutableView {
        nodes,
        edges,
        severed_edges,
        annotation_ids,
    }
}
