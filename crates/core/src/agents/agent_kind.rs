//! Agent kind enumeration for determining which adapter to use.

use ag_protocol::entrypoint_models::AgentKindConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Chat,
    Cli,
    Team,
    Mock,
}

impl AgentKind {
    /// Infer the agent kind from a model name.
    ///
    /// # Returns
    ///
    /// `Chat` for model families served by chat-completion providers,
    /// `Mock` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use ag_core::agents::AgentKind;
    ///
    /// assert_eq!(AgentKind::from_model_name("gpt-4o-mini"), AgentKind::Chat);
    /// assert_eq!(AgentKind::from_model_name("claude-sonnet-4.5"), AgentKind::Chat);
    /// assert_eq!(AgentKind::from_model_name("test-model"), AgentKind::Mock);
    /// ```
    pub fn from_model_name(model: &str) -> Self {
        const CHAT_FAMILIES: [&str; 8] = [
            "gpt", "o1", "o3", "claude", "gemini", "llama", "mistral", "qwen",
        ];

        let model_lower = model.to_lowercase();
        if CHAT_FAMILIES
            .iter()
            .any(|family| model_lower.starts_with(family) || model_lower.contains(&format!("/{}", family)))
        {
            Self::Chat
        } else {
            Self::Mock
        }
    }

    /// Resolve the kind from configuration, inferring from the model when unset.
    pub fn from_config(kind: Option<AgentKindConfig>, model: &str) -> Self {
        match kind {
            Some(AgentKindConfig::Chat) => Self::Chat,
            Some(AgentKindConfig::Cli) => Self::Cli,
            Some(AgentKindConfig::Team) => Self::Team,
            Some(AgentKindConfig::Mock) => Self::Mock,
            None => Self::from_model_name(model),
        }
    }

    /// Get a human-readable name for the agent kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chat => "Chat",
            Self::Cli => "CLI",
            Self::Team => "Team",
            Self::Mock => "Mock",
        }
    }
}
