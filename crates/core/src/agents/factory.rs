//! Agent factory for creating delegates from entrypoint configurations.

use crate::agents::adapters::{ChatCompletionAgent, CliAgent, MockAgent, RoundRobinTeam, TeamMember};
use crate::agents::agent_kind::AgentKind;
use crate::agents::base::{Agent, AgentError};
use ag_protocol::entrypoint_models::EntrypointConfig;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Env key read for the chat provider's API key when none is configured.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Factory for creating delegate instances based on configuration.
pub struct AgentFactory;

impl AgentFactory {
    /// Create a delegate from an entrypoint definition.
    ///
    /// # Arguments
    ///
    /// * `config` - The definition from `.agent-gallery/entrypoints/*.md`
    /// * `env` - The layered environment the delegate may read credentials from
    ///
    /// # Behavior
    ///
    /// The kind comes from `config.kind`, or from the model name when absent:
    /// - `chat` → `ChatCompletionAgent` keyed by `credential-env` (or `OPENAI_API_KEY`)
    /// - `cli` → `CliAgent` running `command` with `args`
    /// - `mock` → `MockAgent`; `test-failure-model` and `test-unavailable-model`
    ///   select failing and unavailable variants
    /// - `team` → an error; teams need their members and are built by
    ///   [`AgentFactory::create_team`]
    ///
    /// # Examples
    ///
    /// ```
    /// use ag_core::agents::AgentFactory;
    /// use ag_protocol::entrypoint_models::EntrypointConfig;
    /// use std::collections::BTreeMap;
    ///
    /// let mut config = EntrypointConfig::new("echo");
    /// config.model = "test-model".to_string();
    ///
    /// let agent = AgentFactory::create(&config, &BTreeMap::new()).unwrap();
    /// ```
    pub fn create(
        config: &EntrypointConfig,
        env: &BTreeMap<String, String>,
    ) -> Result<Arc<dyn Agent>, AgentError> {
        match AgentKind::from_config(config.kind, &config.model) {
            AgentKind::Chat => {
                let key_name = config
                    .credential_env
                    .as_deref()
                    .unwrap_or(DEFAULT_API_KEY_ENV);
                let mut agent =
                    ChatCompletionAgent::new(config.model.clone(), config.system_prompt.clone());
                if let Some(key) = env.get(key_name) {
                    agent = agent.with_api_key(key.clone());
                }
                if let Some(base_url) = &config.base_url {
                    agent = agent.with_base_url(base_url.clone());
                }
                Ok(Arc::new(agent))
            }
            AgentKind::Cli => {
                let command = config.command.clone().ok_or_else(|| {
                    AgentError::ExecutionError(format!(
                        "Entrypoint '{}' has kind cli but no command",
                        config.name
                    ))
                })?;
                Ok(Arc::new(CliAgent::new(command, config.args.clone())))
            }
            AgentKind::Team => Err(AgentError::ExecutionError(format!(
                "Entrypoint '{}' is a team; build it with its members",
                config.name
            ))),
            AgentKind::Mock => Ok(match config.model.as_str() {
                "test-failure-model" => Arc::new(MockAgent::failing()),
                "test-unavailable-model" => Arc::new(MockAgent::unavailable()),
                _ => Arc::new(MockAgent::echo()),
            }),
        }
    }

    /// Create a round-robin team from already-built member delegates.
    pub fn create_team(config: &EntrypointConfig, members: Vec<TeamMember>) -> Arc<dyn Agent> {
        let mut team = RoundRobinTeam::new(members);
        if let Some(max_turns) = config.max_turns {
            team = team.with_max_turns(max_turns);
        }
        if let Some(phrase) = &config.termination {
            team = team.with_termination(phrase.clone());
        }
        Arc::new(team)
    }
}
