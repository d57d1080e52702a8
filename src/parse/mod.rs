//! Parse phase: JSON → graph types.

pub mod types;

pub use types::{Edge, Graph, Node, NodeConfig, NodeData};

use crate::error::{CompilerError, ErrorKind};

/// Deserialize a workflow graph JSON string.
pub fn parse(json: &str) -> Result<Graph, Vec<CompilerError>> {
    serde_json::from_str::<Graph>(json).map_err(|e| {
        vec![CompilerError::parse(
            ErrorKind::MalformedGraph,
            format!("Failed to parse workflow graph JSON: {}", e),
        )]
    })
}
