//! Delegate output shapes and response normalization.
//!
//! Collaborators return results in a handful of shapes: a bare string, a
//! message carrying `content`, a conversation carrying `messages`, a
//! completion carrying `text`, or some other structured value. The shape is
//! decided once, at the integration boundary, by [`AgentOutput::from_value`];
//! after that [`normalize`] is a plain match.

use crate::agents::base::{AgentError, AgentStream};
use crate::resolver::value_to_string;
use ag_protocol::request_models::{ChatMessage, Role};
use ag_protocol::response_models::ResponseChunk;
use serde_json::Value;
use std::fmt;
use std::pin::Pin;
use tokio_stream::{Stream, StreamExt};

/// A delegate result, tagged by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutput {
    /// A bare string.
    Plain(String),
    /// An object exposing `content`.
    Message { content: String },
    /// An object exposing a non-empty `messages` list.
    Conversation(Vec<ChatMessage>),
    /// An object exposing `text`.
    Completion { text: String },
    /// Anything else.
    Structured(Value),
}

/// Stream of normalized chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<ResponseChunk, AgentError>> + Send>>;

impl AgentOutput {
    /// Classify a JSON-like collaborator result.
    ///
    /// Probe order is fixed: `content` (when not null), then a non-empty
    /// `messages` array, then `text` (when not null). A `content` key always
    /// wins, whatever else the object carries.
    pub fn from_value(value: Value) -> Self {
        let map = match &value {
            Value::String(s) => return Self::Plain(s.clone()),
            Value::Object(map) => map,
            _ => return Self::Structured(value.clone()),
        };

        if let Some(content) = map.get("content").filter(|v| !v.is_null()) {
            return Self::Message {
                content: value_to_string(content),
            };
        }

        if let Some(messages) = map
            .get("messages")
            .and_then(Value::as_array)
            .filter(|m| !m.is_empty())
        {
            return Self::Conversation(messages.iter().map(message_from_value).collect());
        }

        if let Some(text) = map.get("text").filter(|v| !v.is_null()) {
            return Self::Completion {
                text: value_to_string(text),
            };
        }

        Self::Structured(value)
    }
}

impl From<String> for AgentOutput {
    fn from(s: String) -> Self {
        Self::Plain(s)
    }
}

impl From<&str> for AgentOutput {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_string())
    }
}

impl From<Value> for AgentOutput {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl fmt::Display for AgentOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&normalize(self))
    }
}

fn message_from_value(value: &Value) -> ChatMessage {
    if let Value::String(s) = value {
        return ChatMessage::assistant(s.clone());
    }

    let role = value
        .get("role")
        .cloned()
        .and_then(|r| serde_json::from_value::<Role>(r).ok())
        .unwrap_or_default();
    let content = value
        .get("content")
        .filter(|v| !v.is_null())
        .map(value_to_string)
        .unwrap_or_default();

    let message = ChatMessage::new(role, content);
    match value.get("name").and_then(Value::as_str) {
        Some(name) => message.with_name(name),
        None => message,
    }
}

/// Extract the plain string from a delegate result.
///
/// A conversation yields the content of its final message.
pub fn normalize(output: &AgentOutput) -> String {
    match output {
        AgentOutput::Plain(s) => s.clone(),
        AgentOutput::Message { content } => content.clone(),
        AgentOutput::Conversation(messages) => messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default(),
        AgentOutput::Completion { text } => text.clone(),
        AgentOutput::Structured(value) => value_to_string(value),
    }
}

/// Wrap every delegate chunk as a `content` chunk.
///
/// Yields exactly one chunk per input item; errors pass through untouched.
pub fn normalize_stream(stream: AgentStream) -> ChunkStream {
    Box::pin(stream.map(|item| item.map(|output| ResponseChunk::content(normalize(&output)))))
}
