//! Configuration models that aggregate all settings.

use ag_protocol::config_models::GlobalConfig;
use ag_protocol::entrypoint_models::EntrypointConfig;
use std::collections::BTreeMap;

/// Unified application configuration loaded from `.agent-gallery/`.
///
/// This structure aggregates all configuration sources:
/// - `config.toml`: Global settings
/// - `entrypoints/*.md`, `entrypoints/*.yaml`: Entrypoint definitions
/// - the env file named by `config.toml`, overlaid by the process environment
///
/// # Example
///
/// ```rust,no_run
/// use ag_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Loaded {} entrypoints", config.entrypoints.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// Entrypoint definitions, in file-name order.
    pub entrypoints: Vec<EntrypointConfig>,

    /// Layered environment available to delegates.
    pub env: BTreeMap<String, String>,
}

impl AppConfig {
    pub fn entrypoint(&self, name: &str) -> Option<&EntrypointConfig> {
        self.entrypoints.iter().find(|e| e.name == name)
    }
}
