//! Error types for workflow graphs.

use crate::agents::base::AgentError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Graph has no entry point")]
    MissingEntryPoint,

    #[error("Unknown node '{0}'")]
    UnknownNode(String),

    #[error("Node '{0}' already has an outgoing edge")]
    DuplicateEdge(String),

    #[error("Node '{0}' has no outgoing edge")]
    NoOutgoingEdge(String),

    #[error("Router on '{from}' chose undeclared target '{to}'")]
    UnknownRoute { from: String, to: String },

    #[error("Recursion limit of {0} steps reached")]
    RecursionLimit(usize),

    #[error("Node '{node}' failed: {reason}")]
    NodeFailed { node: String, reason: String },
}

impl From<WorkflowError> for AgentError {
    fn from(e: WorkflowError) -> Self {
        AgentError::ExecutionError(e.to_string())
    }
}
