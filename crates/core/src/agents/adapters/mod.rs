//! Delegate adapter implementations.

mod chat_agent;
mod cli_agent;
pub mod mock_agent;
mod rag_agent;
mod team;
mod workflow_agent;

pub use chat_agent::ChatCompletionAgent;
pub use cli_agent::CliAgent;
pub use mock_agent::MockAgent;
pub use rag_agent::RagAgent;
pub use team::{RoundRobinTeam, TeamMember};
pub use workflow_agent::WorkflowAgent;
