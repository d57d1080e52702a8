//! Node scheduling metadata extraction.
//!
//! These fields shape how the engine schedules a node, not what the
//! component receives as arguments, so they are split off from params into a
//! per-node metadata record. Invalid values are dropped with a warning.

use crate::definition::{JoinStrategy, NodeMetadata};
use crate::parse::types::Node;
use crate::validate::ValidationIssue;

pub fn compile_node_metadata(node: &Node) -> (NodeMetadata, Vec<ValidationIssue>) {
    let mut warnings = Vec::new();
    let config = &node.data.config;

    let join_strategy = match config.join_strategy.as_deref() {
        None => None,
        Some(raw) => match JoinStrategy::parse(raw) {
            Some(strategy) => Some(strategy),
            None => {
                drop_warning(
                    &mut warnings,
                    node,
                    "joinStrategy",
                    format!("Unknown join strategy '{}'", raw),
                    "use one of: all, any, first",
                );
                None
            }
        },
    };

    let stream_id = keep_non_empty(&mut warnings, node, "streamId", config.stream_id.as_deref());
    let group_id = keep_non_empty(&mut warnings, node, "groupId", config.group_id.as_deref());

    let max_concurrency = match config.max_concurrency {
        None => None,
        Some(n) if n.is_finite() && n >= 1.0 => Some(n as u32),
        Some(n) => {
            drop_warning(
                &mut warnings,
                node,
                "maxConcurrency",
                format!("Invalid concurrency cap '{}'", n),
                "use a finite number of at least 1",
            );
            None
        }
    };

    let metadata = NodeMetadata {
        label: node.label().to_string(),
        component_id: node.component.clone(),
        join_strategy,
        stream_id,
        group_id,
        max_concurrency,
        mode: config.mode.clone(),
        tool_config: config.tool_config.clone(),
    };

    (metadata, warnings)
}

fn keep_non_empty(
    warnings: &mut Vec<ValidationIssue>,
    node: &Node,
    field: &str,
    value: Option<&str>,
) -> Option<String> {
    match value {
        None => None,
        Some(s) if !s.is_empty() => Some(s.to_string()),
        Some(_) => {
            drop_warning(
                warnings,
                node,
                field,
                "Empty identifier".to_string(),
                "set a non-empty value or remove the field",
            );
            None
        }
    }
}

fn drop_warning(
    warnings: &mut Vec<ValidationIssue>,
    node: &Node,
    field: &str,
    reason: String,
    suggestion: &str,
) {
    tracing::warn!(node = %node.id, field, %reason, "dropping scheduling field");
    warnings.push(
        ValidationIssue::new(
            Some(node.id.clone()),
            Some(field.to_string()),
            format!("{} on node '{}'; the field was dropped", reason, node.id),
        )
        .with_suggestion(suggestion),
    );
}
