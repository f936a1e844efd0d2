//! Entrypoint configuration models for `.agent-gallery/entrypoints/*.md`.
//!
//! Entrypoints are defined as Markdown files with YAML front matter. The
//! front matter describes how input is resolved and which delegate handles
//! it; the Markdown body becomes the delegate's system prompt.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which kind of delegate backs an entrypoint.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
pub enum AgentKindConfig {
    /// OpenAI-compatible chat-completion provider.
    Chat,
    /// External agent process speaking JSON Lines on stdout.
    Cli,
    /// Round-robin team of other entrypoints' delegates.
    Team,
    /// Scripted delegate for demos and tests.
    Mock,
}

/// How delegate failures surface to the caller.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Return the error to the caller.
    #[default]
    Propagate,
    /// Convert the error into a `success: false` response or an `error` chunk.
    Capture,
}

/// How candidate fields are turned into a single input string.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveStrategy {
    /// Use the first candidate field with a truthy value.
    #[default]
    FirstMatch,
    /// Join every truthy candidate field with newlines.
    Joined,
}

/// An entrypoint definition.
///
/// # Example
///
/// ```markdown
/// ---
/// name: recipe-helper
/// description: Suggests a recipe from a list of ingredients
/// kind: chat
/// model: gpt-4o-mini
/// fields: [ingredients, pantry]
/// default: "eggs and rice"
/// credential-env: OPENAI_API_KEY
/// failure-policy: capture
/// ---
///
/// You are a helpful cook. Suggest one recipe.
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct EntrypointConfig {
    /// Unique identifier used to invoke the entrypoint.
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Delegate kind. Inferred from `model` when omitted.
    #[serde(default)]
    pub kind: Option<AgentKindConfig>,

    /// Model identifier forwarded to the provider.
    #[serde(default)]
    pub model: String,

    /// Candidate field names, scanned in order.
    #[serde(default)]
    pub fields: Vec<String>,

    /// Input used when neither a field nor a positional argument is supplied.
    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub strategy: ResolveStrategy,

    /// Whether the entrypoint streams by default.
    #[serde(default)]
    pub streaming: bool,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Environment key that must be set before the delegate is invoked.
    #[serde(default)]
    pub credential_env: Option<String>,

    /// Program to spawn for `cli` entrypoints.
    #[serde(default)]
    pub command: Option<String>,

    /// Arguments placed before the input for `cli` entrypoints.
    #[serde(default)]
    pub args: Vec<String>,

    /// Provider base URL for `chat` entrypoints.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Entrypoint names taking turns in a `team` entrypoint.
    #[serde(default)]
    pub members: Vec<String>,

    /// Number of turns for a `team` entrypoint.
    #[serde(default)]
    pub max_turns: Option<usize>,

    /// Phrase that ends a `team` conversation early.
    #[serde(default)]
    pub termination: Option<String>,

    /// The Markdown body, not part of the front matter.
    #[serde(skip)]
    pub system_prompt: String,
}

impl EntrypointConfig {
    /// Minimal definition with every optional setting at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind: None,
            model: String::new(),
            fields: Vec::new(),
            default: None,
            strategy: ResolveStrategy::default(),
            streaming: false,
            failure_policy: FailurePolicy::default(),
            credential_env: None,
            command: None,
            args: Vec::new(),
            base_url: None,
            members: Vec::new(),
            max_turns: None,
            termination: None,
            system_prompt: String::new(),
        }
    }
}
