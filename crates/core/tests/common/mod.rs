//! Common test utilities shared by the integration tests.
//!
//! This module provides:
//! - Test fixtures (sample `.agent-gallery/` projects, script paths)
//! - Custom assertions over chunk sequences
//! - Mock delegates with fixed output shapes

pub mod assertions;
pub mod fixtures;
pub mod mock_agents;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_agents::*;
