//! Full compilation pipeline: normalize → graph → lower → validate.
//!
//! A pure function from (graph, registry) to a definition or an aggregated
//! error list. No state survives between calls.

use crate::error::{CompileFailure, CompilerError, ErrorKind};
use crate::definition::WorkflowDefinition;
use crate::graph::DependencyGraph;
use crate::normalize;
use crate::parse;
use crate::registry::ComponentRegistry;
use crate::validate::{self, ValidationIssue};
use crate::lower;

#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub definition: WorkflowDefinition,
    /// Non-blocking findings, surfaced to the user alongside the result.
    pub warnings: Vec<ValidationIssue>,
}

/// Compile a workflow graph into an executable definition.
pub fn compile(
    graph: &parse::types::Graph,
    registry: &dyn ComponentRegistry,
) -> Result<CompileOutput, CompileFailure> {
    tracing::debug!(
        workflow = %graph.name,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "compiling workflow graph"
    );

    // 1. Executable view (presentation nodes filtered out)
    let view = normalize::executable_view(graph, registry);

    // 2. Dependency graph
    let deps = DependencyGraph::build(&view).map_err(CompileFailure::from)?;

    // 3. Lower to the definition
    let mut warnings = Vec::new();
    let (definition, ports_by_node) =
        lower::lower(graph, &view, &deps, registry, &mut warnings).map_err(CompileFailure::from)?;

    // 4. Holistic validation
    let report =
        validate::validate_definition(graph, &view, &deps, &ports_by_node, &definition, warnings);
    if !report.is_valid {
        let errors = report
            .errors
            .iter()
            .map(|issue| {
                CompilerError::validate(
                    ErrorKind::SemanticValidationFailed,
                    issue.to_string(),
                    issue.node.clone(),
                )
            })
            .collect();
        return Err(CompileFailure { errors });
    }

    tracing::debug!(
        workflow = %graph.name,
        actions = definition.actions.len(),
        warnings = report.warnings.len(),
        "workflow graph compiled"
    );

    Ok(CompileOutput {
        definition,
        warnings: report.warnings,
    })
}

/// Parse a workflow graph from JSON and compile it.
pub fn compile_json(
    json: &str,
    registry: &dyn ComponentRegistry,
) -> Result<CompileOutput, CompileFailure> {
    let graph = parse::parse(json).map_err(CompileFailure::from)?;
    compile(&graph, registry)
}
