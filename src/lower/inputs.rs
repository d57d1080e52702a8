//! Input mapping and manual-override reconciliation.
//!
//! Edge-derived connections and manually supplied values are merged per
//! port-level priority: a connection wins unless the port declares
//! `manual-first`, and required ports must end up satisfied either way.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::definition::{InputMapping, SELF_HANDLE};
use crate::error::{CompilerError, ErrorKind};
use crate::graph::EdgeLabel;
use crate::parse::types::Node;
use crate::ports::{PortSet, ValuePriority};
use crate::validate::ValidationIssue;

#[derive(Debug)]
pub struct ResolvedInputs {
    pub params: serde_json::Map<String, Value>,
    pub input_overrides: serde_json::Map<String, Value>,
    pub mappings: BTreeMap<String, InputMapping>,
}

/// Reconcile one node's incoming edges against its manual configuration.
pub fn resolve_inputs(
    node: &Node,
    ports: &PortSet,
    incoming: &[(&str, &EdgeLabel)],
    warnings: &mut Vec<ValidationIssue>,
) -> Result<ResolvedInputs, Vec<CompilerError>> {
    let mut mappings: BTreeMap<String, InputMapping> = BTreeMap::new();

    for (source, label) in incoming {
        // Editors may omit the target handle; the source handle then names
        // the port on both ends.
        let Some(target_port) = label
            .target_handle
            .clone()
            .or_else(|| label.source_handle.clone())
        else {
            // dependency-only edge, nothing to bind
            continue;
        };

        let mapping = InputMapping {
            source_ref: source.to_string(),
            source_handle: label
                .source_handle
                .clone()
                .unwrap_or_else(|| SELF_HANDLE.to_string()),
        };

        if mappings.insert(target_port.clone(), mapping).is_some() {
            warnings.push(
                ValidationIssue::new(
                    Some(node.id.clone()),
                    Some(target_port.clone()),
                    format!(
                        "Input '{}' on node '{}' is connected more than once; the last edge wins",
                        target_port, node.id
                    ),
                )
                .with_suggestion("remove the extra connection"),
            );
        }
    }

    let mut params = node.data.config.params.clone();
    let mut input_overrides = node.data.config.input_overrides.clone();

    for port in &ports.inputs {
        let connected = mappings.contains_key(&port.id);
        if connected && port.value_priority != ValuePriority::ManualFirst {
            params.remove(&port.id);
            input_overrides.remove(&port.id);
        }
    }

    let mut errors = Vec::new();
    for port in ports.inputs.iter().filter(|p| p.required) {
        let satisfied = mappings.contains_key(&port.id)
            || non_empty(input_overrides.get(&port.id))
            || non_empty(params.get(&port.id));
        if !satisfied {
            errors.push(CompilerError::lower(
                ErrorKind::MissingRequiredInput,
                format!(
                    "Required input '{}' on node '{}' is not satisfied; provide a manual value or connect a port",
                    port.id, node.id
                ),
                Some(node.id.clone()),
            ));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ResolvedInputs {
        params,
        input_overrides,
        mappings,
    })
}

/// A manual value satisfies a required port only if it carries content;
/// `null` and the empty string do not count.
fn non_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
