//! Mock agent implementation for demos and testing.

use crate::agents::base::{Agent, AgentError, AgentStream};
use crate::response::AgentOutput;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Scripted delegate.
///
/// With a script, `run_stream` yields every scripted item and `run` returns
/// the last one. Without a script the agent echoes its input. Calls and the
/// last input are recorded so tests can assert whether the delegate was
/// reached.
#[derive(Clone)]
pub struct MockAgent {
    available: bool,
    outputs: Vec<Result<AgentOutput, AgentError>>,
    calls: Arc<AtomicUsize>,
    last_input: Arc<Mutex<Option<String>>>,
}

impl MockAgent {
    pub fn new(available: bool, outputs: Vec<Result<AgentOutput, AgentError>>) -> Self {
        Self {
            available,
            outputs,
            calls: Arc::new(AtomicUsize::new(0)),
            last_input: Arc::new(Mutex::new(None)),
        }
    }

    /// Replies with its input.
    pub fn echo() -> Self {
        Self::new(true, vec![])
    }

    pub fn success() -> Self {
        Self::new(
            true,
            vec![Ok(AgentOutput::Message {
                content: "Mock response".to_string(),
            })],
        )
    }

    /// Yields each chunk as a separate plain output.
    pub fn streaming<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            true,
            chunks
                .into_iter()
                .map(|c| Ok(AgentOutput::Plain(c.into())))
                .collect(),
        )
    }

    pub fn unavailable() -> Self {
        Self::new(false, vec![])
    }

    pub fn failing() -> Self {
        Self::new(
            true,
            vec![
                Ok(AgentOutput::Plain("Starting...".to_string())),
                Err(AgentError::ExecutionError("Mock failure".to_string())),
            ],
        )
    }

    /// Number of `run`/`run_stream` calls that reached the delegate.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn last_input(&self) -> Option<String> {
        self.last_input.lock().await.clone()
    }

    async fn record(&self, input: &str) -> Result<(), AgentError> {
        if !self.available {
            return Err(AgentError::NotAvailable("Mock agent not available".to_string()));
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().await = Some(input.to_string());
        Ok(())
    }
}

#[async_trait]
impl Agent for MockAgent {
    async fn check_availability(&self) -> bool {
        self.available
    }

    async fn run(&self, input: &str) -> Result<AgentOutput, AgentError> {
        self.record(input).await?;

        match self.outputs.last() {
            Some(last) => last.clone(),
            None => Ok(AgentOutput::Plain(input.to_string())),
        }
    }

    async fn run_stream(&self, input: &str) -> Result<AgentStream, AgentError> {
        self.record(input).await?;

        let outputs = if self.outputs.is_empty() {
            vec![Ok(AgentOutput::Plain(input.to_string()))]
        } else {
            self.outputs.clone()
        };
        Ok(Box::pin(tokio_stream::iter(outputs)))
    }
}
