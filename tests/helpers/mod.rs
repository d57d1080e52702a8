#![allow(dead_code)]

use playbook_compiler::parse::types::{Edge, Graph, Node, NodeConfig, NodeData};
use playbook_compiler::ports::{PortMetadata, PortSet, PortType};
use playbook_compiler::registry::{
    ComponentRole, ComponentSpec, InMemoryRegistry, PortResolutionError,
};
use serde_json::Value;

// =============================================================================
// Component catalog
// =============================================================================

/// Registry with a small security-automation catalog: one trigger, a few
/// actions (one with dynamic ports), and an annotation component.
pub fn registry() -> InMemoryRegistry {
    InMemoryRegistry::new()
        .register(
            ComponentSpec::new("webhook", ComponentRole::Trigger)
                .labeled("Alert webhook")
                .with_output(PortMetadata::optional("event", PortType::json()))
                .with_output(PortMetadata::optional("rule", PortType::text())),
        )
        .register(
            ComponentSpec::new("http_request", ComponentRole::Action)
                .labeled("HTTP request")
                .with_input(PortMetadata::required("url", PortType::text()))
                .with_input(PortMetadata::optional("payload", PortType::json()))
                .with_output(PortMetadata::optional("response", PortType::json()))
                .with_output(PortMetadata::optional("status", PortType::number())),
        )
        .register(
            ComponentSpec::new("enrich_ip", ComponentRole::Action)
                .labeled("IP enrichment")
                .with_input(PortMetadata::required("address", PortType::text()))
                .with_output(PortMetadata::optional("intel", PortType::contract("threat-intel"))),
        )
        .register(
            ComponentSpec::new("open_case", ComponentRole::Action)
                .labeled("Open case")
                .with_input(PortMetadata::required(
                    "intel",
                    PortType::contract("threat-intel"),
                ))
                .with_input(PortMetadata::optional("severity", PortType::text()).manual_first())
                .with_output(PortMetadata::optional("case", PortType::contract("case"))),
        )
        .register(
            ComponentSpec::new("transform", ComponentRole::Action)
                .labeled("Transform")
                .with_input(PortMetadata::required("value", PortType::json()))
                .with_output(PortMetadata::optional("result", PortType::json()))
                .with_resolver(|params| {
                    if params.contains_key("explode") {
                        return Err(PortResolutionError("resolver exploded".into()));
                    }
                    let mut inputs = vec![PortMetadata::required("value", PortType::json())];
                    if let Some(Value::Array(fields)) = params.get("fields") {
                        for field in fields {
                            if let Value::String(name) = field {
                                inputs.push(PortMetadata::optional(name.clone(), PortType::json()));
                            }
                        }
                    }
                    Ok(PortSet {
                        inputs,
                        outputs: vec![PortMetadata::optional("result", PortType::json())],
                    })
                }),
        )
        .register(ComponentSpec::new("noop", ComponentRole::Action).labeled("No-op"))
        .register(ComponentSpec::new("note", ComponentRole::Annotation).labeled("Sticky note"))
}

// =============================================================================
// Graph builders
// =============================================================================

pub fn graph(name: &str, nodes: Vec<Node>, edges: Vec<Edge>) -> Graph {
    Graph {
        name: name.into(),
        description: None,
        config: serde_json::Map::new(),
        nodes,
        edges,
    }
}

pub fn node(id: &str, component: &str) -> Node {
    Node {
        id: id.into(),
        component: component.into(),
        data: NodeData::default(),
    }
}

pub fn node_with_params(id: &str, component: &str, params: Value) -> Node {
    node_with_config(
        id,
        component,
        NodeConfig {
            params: params.as_object().cloned().unwrap_or_default(),
            ..NodeConfig::default()
        },
    )
}

pub fn node_with_config(id: &str, component: &str, config: NodeConfig) -> Node {
    Node {
        id: id.into(),
        component: component.into(),
        data: NodeData {
            label: None,
            config,
        },
    }
}

pub fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge {
        id: id.into(),
        source: source.into(),
        target: target.into(),
        source_handle: None,
        target_handle: None,
    }
}

pub fn connect(
    id: &str,
    source: &str,
    source_handle: &str,
    target: &str,
    target_handle: &str,
) -> Edge {
    Edge {
        id: id.into(),
        source: source.into(),
        target: target.into(),
        source_handle: Some(source_handle.into()),
        target_handle: Some(target_handle.into()),
    }
}
