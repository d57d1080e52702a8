//! Unified compiler error type used across all phases.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Normalize,
    Graph,
    Lower,
    Validate,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Normalize => write!(f, "Normalize"),
            Phase::Graph => write!(f, "Graph"),
            Phase::Lower => write!(f, "Lower"),
            Phase::Validate => write!(f, "Validate"),
        }
    }
}

/// Closed taxonomy of fatal compilation errors. Every failure mode the
/// compiler can report maps to exactly one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedGraph,
    UnknownComponent,
    UnknownNodeReference,
    CyclicGraph,
    MissingRequiredInput,
    MissingEntrypoint,
    InvalidEntrypoint,
    SemanticValidationFailed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MalformedGraph => "MalformedGraph",
            ErrorKind::UnknownComponent => "UnknownComponent",
            ErrorKind::UnknownNodeReference => "UnknownNodeReference",
            ErrorKind::CyclicGraph => "CyclicGraph",
            ErrorKind::MissingRequiredInput => "MissingRequiredInput",
            ErrorKind::MissingEntrypoint => "MissingEntrypoint",
            ErrorKind::InvalidEntrypoint => "InvalidEntrypoint",
            ErrorKind::SemanticValidationFailed => "SemanticValidationFailed",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerError {
    pub kind: ErrorKind,
    pub phase: Phase,
    pub message: String,
    pub node_id: Option<String>,
}

impl fmt::Display for CompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node_id {
            Some(id) => write!(
                f,
                "[{}:{}] {} (node '{}')",
                self.phase, self.kind, self.message, id
            ),
            None => write!(f, "[{}:{}] {}", self.phase, self.kind, self.message),
        }
    }
}

impl std::error::Error for CompilerError {}

impl CompilerError {
    pub fn parse(kind: ErrorKind, message: impl Into<String>) -> Self {
        CompilerError {
            kind,
            phase: Phase::Parse,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn graph(kind: ErrorKind, message: impl Into<String>, node_id: Option<String>) -> Self {
        CompilerError {
            kind,
            phase: Phase::Graph,
            message: message.into(),
            node_id,
        }
    }

    pub fn lower(kind: ErrorKind, message: impl Into<String>, node_id: Option<String>) -> Self {
        CompilerError {
            kind,
            phase: Phase::Lower,
            message: message.into(),
            node_id,
        }
    }

    pub fn validate(kind: ErrorKind, message: impl Into<String>, node_id: Option<String>) -> Self {
        CompilerError {
            kind,
            phase: Phase::Validate,
            message: message.into(),
            node_id,
        }
    }
}

/// Aggregate failure returned by `compile`. Renders one line per underlying
/// error so a caller can surface the whole list in a single message.
#[derive(Debug, Clone)]
pub struct CompileFailure {
    pub errors: Vec<CompilerError>,
}

impl CompileFailure {
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.errors.iter().map(|e| e.kind).collect()
    }

    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }
}

impl From<Vec<CompilerError>> for CompileFailure {
    fn from(errors: Vec<CompilerError>) -> Self {
        CompileFailure { errors }
    }
}

impl fmt::Display for CompileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "workflow compilation failed with {} error(s):",
            self.errors.len()
        )?;
        for error in &self.errors {
            writeln!(f, "  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileFailure {}
