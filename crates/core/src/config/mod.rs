//! Configuration loading and management.
//!
//! This module loads the `.agent-gallery/` directory: global settings,
//! entrypoint definitions, and the layered environment their delegates
//! read credentials from.

pub mod env;
pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_config;
pub use models::AppConfig;
