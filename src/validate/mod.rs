//! Holistic semantic validation of the compiled definition.
//!
//! Re-checks cross-cutting rules the per-stage checks do not cover. Errors
//! abort compilation as one aggregated failure; warnings ride along with a
//! successful result and are never silently dropped.

pub mod ports;
pub mod structural;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::definition::WorkflowDefinition;
use crate::graph::DependencyGraph;
use crate::normalize::ExecutableView;
use crate::parse::types::Graph;
use crate::ports::PortSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub node: Option<String>,
    pub field: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    pub fn new(node: Option<String>, field: Option<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            node,
            field,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({})", suggestion)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// Run every holistic rule. `carried_warnings` are the warnings accumulated
/// by earlier stages; they are folded into the report unchanged.
pub fn validate_definition(
    graph: &Graph,
    view: &ExecutableView<'_>,
    deps: &DependencyGraph,
    ports_by_node: &HashMap<String, PortSet>,
    definition: &WorkflowDefinition,
    carried_warnings: Vec<ValidationIssue>,
) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = carried_warnings;

    structural::validate_structural(graph, view, deps, definition, &mut errors, &mut warnings);
    ports::validate_edge_types(view, ports_by_node, &mut errors, &mut warnings);

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}
