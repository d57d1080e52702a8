//! Serde types mirroring the visual editor's workflow graph JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// TOP-LEVEL GRAPH
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Runtime settings passed through to the definition untouched.
    #[serde(default)]
    pub config: Map<String, Value>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
}

// =============================================================================
// NODES
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Component type reference, resolved through the capability registry.
    #[serde(rename = "type")]
    pub component: String,
    #[serde(default)]
    pub data: NodeData,
}

impl Node {
    pub fn label(&self) -> &str {
        self.data.label.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub config: NodeConfig,
}

/// User-editable node configuration. `params` and `input_overrides` feed the
/// component itself; the remaining fields steer scheduling and are split off
/// into per-node metadata during lowering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    #[serde(default)]
    pub params: Map<String, Value>,
    #[serde(default)]
    pub input_overrides: Map<String, Value>,
    #[serde(default)]
    pub join_strategy: Option<String>,
    #[serde(default)]
    pub stream_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub max_concurrency: Option<f64>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub tool_config: Option<Value>,
}
