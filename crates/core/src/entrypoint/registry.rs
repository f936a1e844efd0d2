//! Registry of named entrypoints.

use super::{Entrypoint, EntrypointError, EntrypointStream};
use crate::agents::adapters::TeamMember;
use crate::agents::agent_kind::AgentKind;
use crate::agents::base::Agent;
use crate::agents::factory::AgentFactory;
use crate::config::models::AppConfig;
use ag_protocol::entrypoint_models::EntrypointConfig;
use ag_protocol::request_models::{ChatMessage, EntrypointRequest};
use ag_protocol::response_models::EntrypointResponse;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Looks entrypoints up by name and dispatches calls to them.
#[derive(Clone, Default)]
pub struct EntrypointRegistry {
    entrypoints: BTreeMap<String, Entrypoint>,
}

impl EntrypointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every entrypoint defined in `config`.
    ///
    /// Non-team delegates are created first so that team definitions can
    /// refer to them by entrypoint name. Team members must name non-team
    /// entrypoints, so the outcome never depends on definition order.
    pub fn from_config(config: &AppConfig) -> Result<Self, EntrypointError> {
        let (teams, singles): (Vec<_>, Vec<_>) = config
            .entrypoints
            .iter()
            .partition(|e| AgentKind::from_config(e.kind, &e.model) == AgentKind::Team);

        let mut delegates: HashMap<&str, Arc<dyn Agent>> = HashMap::new();
        for definition in singles {
            let kind = AgentKind::from_config(definition.kind, &definition.model);
            debug!(entrypoint = %definition.name, kind = kind.name(), "creating delegate");
            let agent = AgentFactory::create(definition, &config.env)?;
            delegates.insert(definition.name.as_str(), agent);
        }

        let team_names: HashSet<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        let mut agents = delegates.clone();
        for definition in teams {
            let members = Self::team_members(definition, &delegates, &team_names)?;
            agents.insert(
                definition.name.as_str(),
                AgentFactory::create_team(definition, members),
            );
        }

        let mut registry = Self::new();
        for definition in &config.entrypoints {
            if let Some(agent) = agents.get(definition.name.as_str()) {
                registry.register(Entrypoint::from_config(
                    definition,
                    agent.clone(),
                    &config.global,
                    &config.env,
                ));
            }
        }

        debug!(count = registry.entrypoints.len(), "entrypoint registry built");
        Ok(registry)
    }

    fn team_members(
        definition: &EntrypointConfig,
        delegates: &HashMap<&str, Arc<dyn Agent>>,
        team_names: &HashSet<&str>,
    ) -> Result<Vec<TeamMember>, EntrypointError> {
        let invalid = |reason: String| EntrypointError::InvalidConfig {
            name: definition.name.clone(),
            reason,
        };

        if definition.members.is_empty() {
            return Err(invalid("team has no members".to_string()));
        }
        if definition.max_turns == Some(0) {
            return Err(invalid("max_turns must be at least 1".to_string()));
        }

        definition
            .members
            .iter()
            .map(|member| {
                if team_names.contains(member.as_str()) {
                    return Err(invalid(format!("member '{}' is a team", member)));
                }
                delegates
                    .get(member.as_str())
                    .map(|agent| TeamMember::new(member.clone(), agent.clone()))
                    .ok_or_else(|| invalid(format!("unknown team member '{}'", member)))
            })
            .collect()
    }

    /// Add an entrypoint, replacing any existing one with the same name.
    pub fn register(&mut self, entrypoint: Entrypoint) {
        self.entrypoints
            .insert(entrypoint.name().to_string(), entrypoint);
    }

    pub fn get(&self, name: &str) -> Option<&Entrypoint> {
        self.entrypoints.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.entrypoints.contains_key(name)
    }

    /// Entrypoint names in sorted order.
    pub fn list(&self) -> Vec<String> {
        self.entrypoints.keys().cloned().collect()
    }

    /// `(name, description)` pairs in sorted order.
    pub fn describe(&self) -> Vec<(String, String)> {
        self.entrypoints
            .values()
            .map(|e| (e.name().to_string(), e.description().to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entrypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrypoints.is_empty()
    }

    fn lookup(&self, name: &str) -> Result<&Entrypoint, EntrypointError> {
        self.get(name)
            .ok_or_else(|| EntrypointError::NotFound(name.to_string()))
    }

    pub async fn invoke(
        &self,
        name: &str,
        request: &EntrypointRequest,
    ) -> Result<EntrypointResponse, EntrypointError> {
        self.lookup(name)?.invoke(request).await
    }

    pub async fn invoke_messages(
        &self,
        name: &str,
        messages: &[ChatMessage],
    ) -> Result<EntrypointResponse, EntrypointError> {
        self.lookup(name)?.invoke_messages(messages).await
    }

    pub fn invoke_stream(
        &self,
        name: &str,
        request: &EntrypointRequest,
    ) -> Result<EntrypointStream, EntrypointError> {
        Ok(self.lookup(name)?.invoke_stream(request))
    }
}
