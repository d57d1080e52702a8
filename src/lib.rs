//! Workflow graph compiler: turns a user-authored node/edge graph into a
//! validated, topologically ordered definition for the execution engine.

pub mod definition;
pub mod error;
pub mod graph;
pub mod lower;
pub mod normalize;
pub mod parse;
pub mod ports;
pub mod registry;
pub mod validate;

mod compile;

pub use compile::{CompileOutput, compile, compile_json};
