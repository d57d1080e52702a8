//! petgraph-based dependency graph over the executable node set.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::{CompilerError, ErrorKind};
use crate::normalize::ExecutableView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLabel {
    pub id: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

pub struct DependencyGraph {
    pub graph: DiGraph<String, EdgeLabel>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Build adjacency from the executable view. Nodes are inserted in
    /// declaration order, which downstream ordering relies on. Any edge
    /// endpoint that names a missing node is fatal, raised before sorting.
    pub fn build(view: &ExecutableView<'_>) -> Result<Self, Vec<CompilerError>> {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut errors = Vec::new();

        for node in &view.nodes {
            let idx = graph.add_node(node.id.clone());
            node_indices.insert(node.id.clone(), idx);
        }

        for edge in &view.edges {
            let source_idx = node_indices.get(&edge.source);
            let target_idx = node_indices.get(&edge.target);

            match (source_idx, target_idx) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(
                        s,
                        t,
                        EdgeLabel {
                            id: edge.id.clone(),
                            source_handle: edge.source_handle.clone(),
                            target_handle: edge.target_handle.clone(),
                        },
                    );
                }
                (None, _) => {
                    errors.push(CompilerError::graph(
                        ErrorKind::UnknownNodeReference,
                        format!(
                            "Edge '{}' references unknown source node '{}'",
                            edge.id, edge.source
                        ),
                        None,
                    ));
                }
                (_, None) => {
                    errors.push(CompilerError::graph(
                        ErrorKind::UnknownNodeReference,
                        format!(
                            "Edge '{}' references unknown target node '{}'",
                            edge.id, edge.target
                        ),
                        None,
                    ));
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(DependencyGraph {
            graph,
            node_indices,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Incoming edges of a node as `(source id, label)`, in edge declaration
    /// order.
    pub fn incoming_edges(&self, node_id: &str) -> Vec<(&str, &EdgeLabel)> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        let mut edges: Vec<(&str, &EdgeLabel)> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| (self.graph[e.source()].as_str(), e.weight()))
            .collect();
        edges.reverse();
        edges
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return 0;
        };
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .count()
    }
}
