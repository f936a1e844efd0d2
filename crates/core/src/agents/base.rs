//! Base Agent trait and supporting types.

use crate::response::AgentOutput;
use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio_stream::Stream;

/// Stream of partial delegate results.
pub type AgentStream = Pin<Box<dyn Stream<Item = Result<AgentOutput, AgentError>> + Send>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("Agent not available: {0}")]
    NotAvailable(String),
    #[error("API call failed: {0}")]
    ApiError(String),
    #[error("Stream parsing error: {0}")]
    StreamParseError(String),
    #[error("Execution failed: {0}")]
    ExecutionError(String),
}

/// An externally-constructed delegate that entrypoints forward input to.
///
/// Implementations are built once and shared as `Arc<dyn Agent>`; any
/// interior state they keep must be safe to use from concurrent calls.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn check_availability(&self) -> bool;

    /// Run to completion and return the final result.
    async fn run(&self, input: &str) -> Result<AgentOutput, AgentError>;

    /// Run and yield partial results as they arrive.
    ///
    /// Delegates without native streaming yield their blocking result once.
    async fn run_stream(&self, input: &str) -> Result<AgentStream, AgentError> {
        let output = self.run(input).await?;
        Ok(Box::pin(tokio_stream::once(Ok(output))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    struct TestAgent {
        available: bool,
    }

    #[async_trait]
    impl Agent for TestAgent {
        async fn check_availability(&self) -> bool {
            self.available
        }

        async fn run(&self, input: &str) -> Result<AgentOutput, AgentError> {
            if !self.available {
                return Err(AgentError::NotAvailable("Test agent not available".to_string()));
            }
            Ok(AgentOutput::Message {
                content: format!("Processed: {}", input),
            })
        }
    }

    #[tokio::test]
    async fn test_agent_check_availability() {
        let available_agent = TestAgent { available: true };
        assert!(available_agent.check_availability().await);

        let unavailable_agent = TestAgent { available: false };
        assert!(!unavailable_agent.check_availability().await);
    }

    #[tokio::test]
    async fn test_agent_run_success() {
        let agent = TestAgent { available: true };
        let output = agent.run("test instruction").await.unwrap();
        assert_eq!(output.to_string(), "Processed: test instruction");
    }

    #[tokio::test]
    async fn test_default_run_stream_yields_blocking_result_once() {
        let agent = TestAgent { available: true };
        let stream = agent.run_stream("hi").await.unwrap();
        let items: Vec<_> = stream.collect().await;

        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0],
            Ok(AgentOutput::Message {
                content: "Processed: hi".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_default_run_stream_surfaces_errors_before_streaming() {
        let agent = TestAgent { available: false };
        let result = agent.run_stream("hi").await;
        assert!(matches!(result, Err(AgentError::NotAvailable(_))));
    }

    #[test]
    fn test_agent_error_display() {
        let err = AgentError::ApiError("429".to_string());
        assert_eq!(err.to_string(), "API call failed: 429");
    }
}
