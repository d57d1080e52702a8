//! Entry-point resolution: the unique trigger-role action roots the workflow.

use crate::definition::{EntryPoint, WorkflowAction};
use crate::error::{CompilerError, ErrorKind};
use crate::registry::ComponentRegistry;

/// Resolve the workflow entry point from the topologically sorted actions.
/// Exactly one action of a trigger-role component must exist; the entry ref
/// is the first such action in topological order.
pub fn resolve_entrypoint(
    actions: &[WorkflowAction],
    registry: &dyn ComponentRegistry,
) -> Result<EntryPoint, Vec<CompilerError>> {
    let triggers: Vec<&WorkflowAction> = actions
        .iter()
        .filter(|a| {
            registry
                .get(&a.component_id)
                .is_some_and(|spec| spec.is_trigger())
        })
        .collect();

    match triggers.as_slice() {
        [] => Err(vec![CompilerError::lower(
            ErrorKind::MissingEntrypoint,
            "Workflow has no entry action; add exactly one trigger component",
            None,
        )]),
        [only] => Ok(EntryPoint {
            ref_id: only.ref_id.clone(),
        }),
        [expected, extras @ ..] => {
            let found = extras
                .iter()
                .map(|a| format!("'{}' (node '{}')", a.component_id, a.ref_id))
                .collect::<Vec<_>>()
                .join(", ");
            Err(vec![CompilerError::lower(
                ErrorKind::InvalidEntrypoint,
                format!(
                    "Workflow must have exactly one entry action; expected '{}' (node '{}') to be the only trigger, also found {}",
                    expected.component_id, expected.ref_id, found
                ),
                Some(expected.ref_id.clone()),
            )])
        }
    }
}
