//! Workflow graphs.
//!
//! A workflow is a small state machine over a JSON map: nodes transform the
//! state, and edges (fixed or routed by a function of the state) pick the
//! next node until one routes to [`END`].

pub mod error;
pub mod graph;

pub use error::WorkflowError;
pub use graph::{CompiledGraph, State, StateGraph, END};
