//! Entrypoint request models.
//!
//! An entrypoint accepts the same loose calling convention everywhere:
//! any number of named arguments plus any number of positional arguments.
//! Which of them becomes the delegate's input is decided by the entrypoint's
//! input specification, not by the request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Arguments supplied by a caller of an entrypoint.
///
/// # Example
///
/// ```json
/// {
///   "named": { "topic": "rust", "audience": "teens" },
///   "positional": ["hello"]
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct EntrypointRequest {
    /// Named (keyword) arguments, keyed by field name.
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub named: Map<String, Value>,

    /// Positional arguments.
    #[serde(default)]
    #[ts(type = "Array<unknown>")]
    pub positional: Vec<Value>,
}

impl EntrypointRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named argument.
    pub fn with_named(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(key.into(), value.into());
        self
    }

    /// Append a positional argument.
    pub fn with_positional(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// True when the caller supplied nothing at all.
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.positional.is_empty()
    }
}

/// Role of a participant in a chat transcript.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    #[default]
    Assistant,
    Tool,
}

/// A single message in a chat transcript.
///
/// Used both as entrypoint input (message-list entrypoints) and as the
/// output shape of multi-agent conversations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ChatMessage {
    pub role: Role,

    pub content: String,

    /// Name of the speaker, set for team members in a conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Attach a speaker name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
