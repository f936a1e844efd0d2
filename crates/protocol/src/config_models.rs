//! Global configuration models for `.agent-gallery/config.toml`.
//!
//! This module defines the structure of the global configuration file that
//! controls project-wide settings for every entrypoint.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

/// Placeholder forwarded to a delegate when a caller supplies no input.
pub const DEFAULT_INPUT: &str = "Hello";

/// Represents global settings from `.agent-gallery/config.toml`.
///
/// # Example
///
/// ```toml
/// # .agent-gallery/config.toml
/// env-file = ".env"
/// default-input = "Tell me something interesting"
/// log-level = "debug"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Dotenv-style file, relative to the project root, holding credentials.
    #[serde(default)]
    pub env_file: Option<String>,

    /// Input used by entrypoints that do not declare their own default.
    #[serde(default = "default_input")]
    pub default_input: String,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_input() -> String {
    DEFAULT_INPUT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            env_file: None,
            default_input: default_input(),
            log_level: default_log_level(),
        }
    }
}
