//! Compiled workflow definition: the artifact handed to the execution engine.
//!
//! The JSON shape of `WorkflowDefinition` is a wire contract. Breaking shape
//! changes require a `DEFINITION_VERSION` bump.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current wire-contract version of the serialized definition.
pub const DEFINITION_VERSION: u32 = 1;

/// Source handle recorded when an edge names no explicit output port: the
/// whole output of the source action.
pub const SELF_HANDLE: &str = "__self__";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    pub version: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub entrypoint: EntryPoint,
    pub nodes: BTreeMap<String, NodeMetadata>,
    pub edges: Vec<CompiledEdge>,
    pub dependency_counts: BTreeMap<String, usize>,
    /// Topologically sorted: every ref in an action's `depends_on` appears
    /// strictly earlier in this list.
    pub actions: Vec<WorkflowAction>,
    pub config: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    #[serde(rename = "ref")]
    pub ref_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowAction {
    #[serde(rename = "ref")]
    pub ref_id: String,
    pub component_id: String,
    pub params: Map<String, Value>,
    pub input_overrides: Map<String, Value>,
    /// Distinct refs of every edge source targeting this action.
    pub depends_on: BTreeSet<String>,
    pub input_mappings: BTreeMap<String, InputMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputMapping {
    pub source_ref: String,
    pub source_handle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

// =============================================================================
// NODE METADATA
// =============================================================================

/// How the execution engine treats multiple converging inputs. Consumed by
/// the engine, never interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStrategy {
    All,
    Any,
    First,
}

impl JoinStrategy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(JoinStrategy::All),
            "any" => Some(JoinStrategy::Any),
            "first" => Some(JoinStrategy::First),
            _ => None,
        }
    }
}

/// Execution-affecting node settings, kept apart from component params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    pub label: String,
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_strategy: Option<JoinStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<Value>,
}
