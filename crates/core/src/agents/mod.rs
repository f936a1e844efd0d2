//! Delegate abstraction and construction.
//!
//! This module provides the `Agent` trait every delegate implements, the
//! adapters for each supported collaborator, and the `AgentFactory` that
//! builds them from entrypoint definitions.

pub mod adapters;
pub mod agent_kind;
pub mod base;
pub mod cli_executor;
pub mod factory;

pub use adapters::MockAgent;
pub use agent_kind::AgentKind;
pub use base::{Agent, AgentError, AgentStream};
pub use factory::AgentFactory;
