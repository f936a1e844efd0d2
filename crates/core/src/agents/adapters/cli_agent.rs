//! External agent process adapter.

use crate::agents::base::{Agent, AgentError, AgentStream};
use crate::agents::cli_executor::CliExecutor;
use crate::response::AgentOutput;
use async_trait::async_trait;
use tokio_stream::StreamExt;

/// Runs an external program once per call.
///
/// The resolved input is appended as the final argument. Every JSON line the
/// program prints becomes one partial result; the blocking call returns the
/// last of them.
pub struct CliAgent {
    command: String,
    args: Vec<String>,
    working_dir: String,
}

impl CliAgent {
    /// Create a new external agent adapter.
    ///
    /// # Arguments
    ///
    /// * `command` - The program to spawn
    /// * `args` - Arguments placed before the input
    pub fn new(command: String, args: Vec<String>) -> Self {
        Self {
            command,
            args,
            working_dir: std::env::current_dir()
                .ok()
                .and_then(|p| p.to_str().map(|s| s.to_string()))
                .unwrap_or_else(|| ".".to_string()),
        }
    }

    fn command_args(&self, input: &str) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(input.to_string());
        args
    }
}

#[async_trait]
impl Agent for CliAgent {
    async fn check_availability(&self) -> bool {
        which::which(&self.command).is_ok()
    }

    async fn run(&self, input: &str) -> Result<AgentOutput, AgentError> {
        let mut stream = self.run_stream(input).await?;
        let mut last = None;

        while let Some(item) = stream.next().await {
            last = Some(item?);
        }

        last.ok_or_else(|| {
            AgentError::ExecutionError(format!("Command '{}' produced no output", self.command))
        })
    }

    async fn run_stream(&self, input: &str) -> Result<AgentStream, AgentError> {
        let values = CliExecutor::execute(
            self.command.clone(),
            self.command_args(input),
            self.working_dir.clone(),
        );
        Ok(Box::pin(values.map(|item| item.map(AgentOutput::from_value))))
    }
}
