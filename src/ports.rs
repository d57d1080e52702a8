//! Port type algebra and the recursive compatibility checker.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// PORT TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Text,
    Number,
    Boolean,
    Secret,
    File,
    Json,
    Any,
}

impl Primitive {
    /// One-way coercions a target primitive accepts beyond exact equality.
    /// Widening only: values with an obvious textual or JSON rendering may
    /// flow into `text`/`json`, never the other way around.
    fn accepts(self, source: Primitive) -> bool {
        match self {
            Primitive::Text => matches!(source, Primitive::Number | Primitive::Boolean),
            Primitive::Json => matches!(
                source,
                Primitive::Text | Primitive::Number | Primitive::Boolean
            ),
            _ => false,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Primitive::Text => "text",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Secret => "secret",
            Primitive::File => "file",
            Primitive::Json => "json",
            Primitive::Any => "any",
        };
        write!(f, "{}", name)
    }
}

/// Structural type of a port value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PortType {
    Primitive { name: Primitive },
    List { element: Box<PortType> },
    Map { value: Box<PortType> },
    Contract { name: String },
}

impl PortType {
    pub fn text() -> Self {
        PortType::Primitive {
            name: Primitive::Text,
        }
    }

    pub fn number() -> Self {
        PortType::Primitive {
            name: Primitive::Number,
        }
    }

    pub fn boolean() -> Self {
        PortType::Primitive {
            name: Primitive::Boolean,
        }
    }

    pub fn secret() -> Self {
        PortType::Primitive {
            name: Primitive::Secret,
        }
    }

    pub fn file() -> Self {
        PortType::Primitive {
            name: Primitive::File,
        }
    }

    pub fn json() -> Self {
        PortType::Primitive {
            name: Primitive::Json,
        }
    }

    pub fn any() -> Self {
        PortType::Primitive {
            name: Primitive::Any,
        }
    }

    pub fn list(element: PortType) -> Self {
        PortType::List {
            element: Box::new(element),
        }
    }

    pub fn map(value: PortType) -> Self {
        PortType::Map {
            value: Box::new(value),
        }
    }

    pub fn contract(name: impl Into<String>) -> Self {
        PortType::Contract { name: name.into() }
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortType::Primitive { name } => write!(f, "{}", name),
            PortType::List { element } => write!(f, "list<{}>", element),
            PortType::Map { value } => write!(f, "map<{}>", value),
            PortType::Contract { name } => write!(f, "contract<{}>", name),
        }
    }
}

/// Returns true if a value produced on `source` may flow into `target`.
///
/// Coercions are target-anchored, so compatibility is not symmetric:
/// `number → text` holds while `text → number` does not.
pub fn compatible(source: &PortType, target: &PortType) -> bool {
    match (source, target) {
        (
            PortType::Primitive {
                name: Primitive::Any,
            },
            _,
        )
        | (
            _,
            PortType::Primitive {
                name: Primitive::Any,
            },
        ) => true,
        (PortType::Primitive { name: s }, PortType::Primitive { name: t }) => {
            s == t || t.accepts(*s)
        }
        (PortType::Contract { name: s }, PortType::Contract { name: t }) => s == t,
        (PortType::List { element: s }, PortType::List { element: t }) => compatible(s, t),
        (PortType::Map { value: s }, PortType::Map { value: t }) => compatible(s, t),
        _ => false,
    }
}

// =============================================================================
// PORT METADATA
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValuePriority {
    #[default]
    #[serde(rename = "default")]
    Default,
    /// A manually supplied value survives even when the port is connected.
    #[serde(rename = "manual-first")]
    ManualFirst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMetadata {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    pub data_type: PortType,
    #[serde(default)]
    pub value_priority: ValuePriority,
}

impl PortMetadata {
    pub fn required(id: impl Into<String>, data_type: PortType) -> Self {
        let id = id.into();
        PortMetadata {
            label: id.clone(),
            id,
            required: true,
            data_type,
            value_priority: ValuePriority::Default,
        }
    }

    pub fn optional(id: impl Into<String>, data_type: PortType) -> Self {
        let id = id.into();
        PortMetadata {
            label: id.clone(),
            id,
            required: false,
            data_type,
            value_priority: ValuePriority::Default,
        }
    }

    pub fn manual_first(mut self) -> Self {
        self.value_priority = ValuePriority::ManualFirst;
        self
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Effective input/output port set of one node, static or dynamically resolved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortSet {
    pub inputs: Vec<PortMetadata>,
    pub outputs: Vec<PortMetadata>,
}

impl PortSet {
    pub fn input(&self, id: &str) -> Option<&PortMetadata> {
        self.inputs.iter().find(|p| p.id == id)
    }

    pub fn output(&self, id: &str) -> Option<&PortMetadata> {
        self.outputs.iter().find(|p| p.id == id)
    }
}
