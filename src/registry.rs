//! Component capability registry: static port and parameter metadata per
//! component type, plus optional dynamic port resolution.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::ports::{PortMetadata, PortSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentRole {
    /// The designated entry component; a workflow has exactly one such action.
    Trigger,
    Action,
    /// Presentation-only; never scheduled.
    Annotation,
}

/// Error surfaced by a dynamic port resolver. The compiler treats the
/// resolver as untrusted: any failure falls back to static metadata.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct PortResolutionError(pub String);

/// Pure callback recomputing a component's ports from current parameters.
pub type ResolvePortsFn =
    dyn Fn(&Map<String, Value>) -> Result<PortSet, PortResolutionError> + Send + Sync;

pub struct ComponentSpec {
    pub id: String,
    pub label: String,
    pub role: ComponentRole,
    pub inputs: Vec<PortMetadata>,
    pub outputs: Vec<PortMetadata>,
    pub resolve_ports: Option<Arc<ResolvePortsFn>>,
}

impl fmt::Debug for ComponentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentSpec")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("role", &self.role)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("resolve_ports", &self.resolve_ports.is_some())
            .finish()
    }
}

impl ComponentSpec {
    pub fn new(id: impl Into<String>, role: ComponentRole) -> Self {
        let id = id.into();
        ComponentSpec {
            label: id.clone(),
            id,
            role,
            inputs: Vec::new(),
            outputs: Vec::new(),
            resolve_ports: None,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_input(mut self, port: PortMetadata) -> Self {
        self.inputs.push(port);
        self
    }

    pub fn with_output(mut self, port: PortMetadata) -> Self {
        self.outputs.push(port);
        self
    }

    pub fn with_resolver(
        mut self,
        resolver: impl Fn(&Map<String, Value>) -> Result<PortSet, PortResolutionError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.resolve_ports = Some(Arc::new(resolver));
        self
    }

    /// The declared port set, before any dynamic resolution.
    pub fn static_ports(&self) -> PortSet {
        PortSet {
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
        }
    }

    pub fn is_presentation(&self) -> bool {
        self.role == ComponentRole::Annotation
    }

    pub fn is_trigger(&self) -> bool {
        self.role == ComponentRole::Trigger
    }
}

/// Lookup boundary between the compiler and the component catalog.
pub trait ComponentRegistry {
    fn get(&self, id: &str) -> Option<&ComponentSpec>;
}

#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    components: HashMap<String, ComponentSpec>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, spec: ComponentSpec) -> Self {
        self.components.insert(spec.id.clone(), spec);
        self
    }
}

impl ComponentRegistry for InMemoryRegistry {
    fn get(&self, id: &str) -> Option<&ComponentSpec> {
        self.components.get(id)
    }
}
