//! Subprocess executor for external agent processes.
//!
//! External agents are programs that take their input on the command line
//! and print one JSON value per line on stdout.

use crate::agents::base::AgentError;
use std::pin::Pin;
use std::process::Stdio;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::process::Command;
use tokio_stream::Stream;
use tracing::{debug, warn};

/// Spawns an external agent process and parses its JSON Lines output.
pub struct CliExecutor;

impl CliExecutor {
    /// Execute a command and parse its stdout as JSON Lines.
    ///
    /// # Arguments
    ///
    /// * `command` - The program to spawn (e.g., "python3")
    /// * `args` - Command line arguments
    /// * `working_dir` - Working directory for the command
    ///
    /// # Returns
    ///
    /// A stream of `serde_json::Value` objects, one per line of output.
    /// Empty lines are skipped. A line that is not valid JSON yields
    /// `AgentError::StreamParseError`; a non-zero exit status yields
    /// `AgentError::ExecutionError` after all output has been read.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ag_core::agents::cli_executor::CliExecutor;
    /// use tokio_stream::StreamExt;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let stream = CliExecutor::execute(
    ///         "echo".to_string(),
    ///         vec![r#"{"content":"hi"}"#.to_string()],
    ///         ".".to_string(),
    ///     );
    ///
    ///     let values: Vec<_> = stream.collect().await;
    ///     println!("Got {} values", values.len());
    /// }
    /// ```
    pub fn execute(
        command: String,
        args: Vec<String>,
        working_dir: String,
    ) -> Pin<Box<dyn Stream<Item = Result<serde_json::Value, AgentError>> + Send>> {
        let stream = async_stream::stream! {
            let mut cmd = Command::new(&command);
            cmd.args(&args);
            cmd.current_dir(&working_dir);
            cmd.stdin(Stdio::null());
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::null());
            cmd.kill_on_drop(true);

            debug!(command = %command, "spawning external agent");
            let mut child = match cmd.spawn() {
                Ok(child) => child,
                Err(e) => {
                    yield Err(AgentError::ExecutionError(format!(
                        "Failed to spawn command '{}': {}",
                        command, e
                    )));
                    return;
                }
            };

            let stdout = match child.stdout.take() {
                Some(stdout) => stdout,
                None => {
                    yield Err(AgentError::ExecutionError(
                        "Failed to capture stdout".to_string()
                    ));
                    return;
                }
            };

            let reader = BufReader::new(stdout);
            let mut lines = reader.lines();

            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        yield Err(AgentError::StreamParseError(e.to_string()));
                        break;
                    }
                };

                if line.trim().is_empty() {
                    continue;
                }

                match serde_json::from_str::<serde_json::Value>(&line) {
                    Ok(value) => yield Ok(value),
                    Err(e) => {
                        yield Err(AgentError::StreamParseError(format!(
                            "Failed to parse JSON: {} (line: {})",
                            e, line
                        )));
                    }
                }
            }

            match child.wait().await {
                Ok(status) if status.success() => {}
                Ok(status) => {
                    warn!(command = %command, %status, "external agent exited unsuccessfully");
                    yield Err(AgentError::ExecutionError(format!(
                        "Command '{}' exited with {}",
                        command, status
                    )));
                }
                Err(e) => {
                    yield Err(AgentError::ExecutionError(format!(
                        "Failed to wait for command '{}': {}",
                        command, e
                    )));
                }
            }
        };

        Box::pin(stream)
    }
}
