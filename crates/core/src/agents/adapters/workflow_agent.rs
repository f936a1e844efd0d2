//! Workflow graph adapter.

use crate::agents::base::{Agent, AgentError};
use crate::response::AgentOutput;
use crate::workflow::{CompiledGraph, State};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const INPUT_KEY: &str = "input";
pub const OUTPUT_KEY: &str = "output";

/// Runs a compiled workflow graph as a delegate.
///
/// The input is placed under `"input"`; the result is read back from
/// `"output"`, or the whole final state when no node wrote one.
#[derive(Clone)]
pub struct WorkflowAgent {
    graph: Arc<CompiledGraph>,
}

impl WorkflowAgent {
    pub fn new(graph: CompiledGraph) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }
}

#[async_trait]
impl Agent for WorkflowAgent {
    async fn check_availability(&self) -> bool {
        true
    }

    async fn run(&self, input: &str) -> Result<AgentOutput, AgentError> {
        let mut state = State::new();
        state.insert(INPUT_KEY.to_string(), Value::String(input.to_string()));

        let mut state = self.graph.invoke(state)?;
        Ok(match state.remove(OUTPUT_KEY) {
            Some(output) => AgentOutput::from_value(output),
            None => AgentOutput::Structured(Value::Object(state.into_iter().collect())),
        })
    }
}
