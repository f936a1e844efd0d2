//! Mock delegates with fixed output shapes.

use ag_core::agents::base::{Agent, AgentError};
use ag_core::response::AgentOutput;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Returns the same JSON-like value on every call, classified at the
/// boundary like any collaborator result.
#[allow(dead_code)]
pub struct ShapeAgent {
    value: Value,
    calls: Arc<AtomicUsize>,
}

impl ShapeAgent {
    #[allow(dead_code)]
    pub fn new(value: Value) -> Self {
        Self {
            value,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Agent for ShapeAgent {
    async fn check_availability(&self) -> bool {
        true
    }

    async fn run(&self, _input: &str) -> Result<AgentOutput, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AgentOutput::from_value(self.value.clone()))
    }
}
