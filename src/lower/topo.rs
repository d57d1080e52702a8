//! Kahn's-algorithm topological ordering with cycle detection.

use std::collections::VecDeque;

use petgraph::Direction;
use petgraph::graph::NodeIndex;

use crate::error::{CompilerError, ErrorKind};
use crate::graph::DependencyGraph;

/// Returns node ids in dependency order. The queue is seeded in declaration
/// order, so a fixed graph always yields the same ordering and compiled
/// definitions stay reproducible and diffable.
pub fn topo_sort(deps: &DependencyGraph) -> Result<Vec<String>, Vec<CompilerError>> {
    let graph = &deps.graph;

    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|ix| graph.neighbors_directed(ix, Direction::Incoming).count())
        .collect();

    let mut queue: VecDeque<NodeIndex> = graph
        .node_indices()
        .filter(|ix| in_degree[ix.index()] == 0)
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(ix) = queue.pop_front() {
        order.push(graph[ix].clone());

        // neighbors_directed iterates in reverse insertion order
        let mut successors: Vec<NodeIndex> =
            graph.neighbors_directed(ix, Direction::Outgoing).collect();
        successors.reverse();

        for next in successors {
            in_degree[next.index()] -= 1;
            if in_degree[next.index()] == 0 {
                queue.push_back(next);
            }
        }
    }

    if order.len() < graph.node_count() {
        let stuck: Vec<&str> = graph
            .node_indices()
            .filter(|ix| in_degree[ix.index()] > 0)
            .map(|ix| graph[ix].as_str())
            .collect();
        return Err(vec![CompilerError::lower(
            ErrorKind::CyclicGraph,
            format!(
                "Workflow graph contains a cycle involving: {}",
                stuck.join(", ")
            ),
            stuck.first().map(|s| s.to_string()),
        )]);
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::ExecutableView;
    use crate::parse::types::{Edge, Node, NodeData};
    use std::collections::HashSet;

    fn node(id: &str) -> Node {
        Node {
            id: id.into(),
            component: "step".into(),
            data: NodeData::default(),
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> Edge {
        Edge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    fn deps(nodes: &[Node], edges: &[Edge]) -> DependencyGraph {
        let view = ExecutableView {
            nodes: nodes.iter().collect(),
            edges: edges.iter().collect(),
            severed_edges: vec![],
            annotation_ids: HashSet::new(),
        };
        DependencyGraph::build(&view).expect("graph should build")
    }

    #[test]
    fn diamond_respects_dependencies() {
        let nodes = vec![node("a"), node("b"), node("c"), node("d")];
        let edges = vec![
            edge("e1", "a", "b"),
            edge("e2", "a", "c"),
            edge("e3", "b", "d"),
            edge("e4", "c", "d"),
        ];
        let order = topo_sort(&deps(&nodes, &edges)).expect("acyclic");
        let pos = |id: &str| order.iter().position(|n| n == id).unwrap();
        assert_eq!(pos("a"), 0);
        assert!(pos("b") < pos("d"));
        assert!(pos("c") < pos("d"));
    }

    #[test]
    fn ordering_is_stable_across_runs() {
        let nodes = vec![node("x"), node("y"), node("z"), node("w")];
        let edges = vec![edge("e1", "x", "z"), edge("e2", "y", "z"), edge("e3", "z", "w")];
        let first = topo_sort(&deps(&nodes, &edges)).expect("acyclic");
        let second = topo_sort(&deps(&nodes, &edges)).expect("acyclic");
        assert_eq!(first, second);
        // independent roots keep declaration order
        assert_eq!(first[0], "x");
        assert_eq!(first[1], "y");
    }

    #[test]
    fn three_node_cycle_is_detected() {
        let nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![edge("e1", "a", "b"), edge("e2", "b", "c"), edge("e3", "c", "a")];
        let errors = topo_sort(&deps(&nodes, &edges)).expect_err("cyclic");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::CyclicGraph);
        assert!(errors[0].node_id.is_some());
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let nodes = vec![node("a")];
        let edges = vec![edge("e1", "a", "a")];
        let errors = topo_sort(&deps(&nodes, &edges)).expect_err("cyclic");
        assert_eq!(errors[0].kind, ErrorKind::CyclicGraph);
        assert!(errors[0].message.contains("'a'") || errors[0].message.contains("a"));
    }
}
