//! Edge-level port type compatibility checks.
//!
//! Uses the resolved (possibly dynamic) port sets, so an edge handle that
//! names no known port is only a warning; a handle that resolves on both
//! ends must type-check.

use std::collections::HashMap;

use crate::normalize::ExecutableView;
use crate::ports::{PortSet, compatible};

use super::ValidationIssue;

pub fn validate_edge_types(
    view: &ExecutableView<'_>,
    ports_by_node: &HashMap<String, PortSet>,
    errors: &mut Vec<ValidationIssue>,
    warnings: &mut Vec<ValidationIssue>,
) {
    for edge in &view.edges {
        let Some(source_ports) = ports_by_node.get(&edge.source) else {
            continue;
        };
        let Some(target_ports) = ports_by_node.get(&edge.target) else {
            continue;
        };

        let source_meta = match edge.source_handle.as_deref() {
            None => None,
            Some(handle) => match source_ports.output(handle) {
                Some(meta) => Some(meta),
                None => {
                    warnings.push(ValidationIssue::new(
                        Some(edge.source.clone()),
                        Some(handle.to_string()),
                        format!(
                            "Edge '{}' names output '{}' which is not declared on node '{}'",
                            edge.id, handle, edge.source
                        ),
                    ));
                    None
                }
            },
        };

        let Some(target_handle) = edge
            .target_handle
            .as_deref()
            .or(edge.source_handle.as_deref())
        else {
            continue;
        };

        let target_meta = match target_ports.input(target_handle) {
            Some(meta) => Some(meta),
            None => {
                warnings.push(ValidationIssue::new(
                    Some(edge.target.clone()),
                    Some(target_handle.to_string()),
                    format!(
                        "Edge '{}' names input '{}' which is not declared on node '{}'",
                        edge.id, target_handle, edge.target
                    ),
                ));
                None
            }
        };

        if let (Some(source), Some(target)) = (source_meta, target_meta) {
            if !compatible(&source.data_type, &target.data_type) {
                errors.push(
                    ValidationIssue::new(
                        Some(edge.target.clone()),
                        Some(target.id.clone()),
                        format!(
                            "Incompatible connection on edge '{}': output '{}' of node '{}' produces {}, input '{}' of node '{}' expects {}",
                            edge.id,
                            source.id,
                            edge.source,
                            source.data_type,
                            target.id,
                            edge.target,
                            target.data_type
                        ),
                    )
                    .with_suggestion("insert a conversion step or connect a matching port"),
                );
            }
        }
    }
}
