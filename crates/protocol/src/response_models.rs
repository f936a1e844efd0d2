//! Entrypoint response models.
//!
//! Blocking entrypoints return an [`EntrypointResponse`]. Streaming
//! entrypoints yield a sequence of [`ResponseChunk`]s, all sharing one shape
//! regardless of the delegate's native chunk type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Discriminator carried by every streaming chunk.
///
/// A streaming session is framed as:
/// `SessionInfo`, `Content`*, then `Complete` (or `Error`), then `SessionEnd`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    /// Incremental output from the delegate.
    #[default]
    Content,

    /// Opens a session; content is a JSON object describing it.
    SessionInfo,

    /// Closes a session; content is the session id.
    SessionEnd,

    /// The delegate failed; content is the error message.
    Error,

    /// The delegate finished; content is the accumulated output.
    Complete,
}

/// One element of a streaming entrypoint's output.
///
/// ```json
/// { "type": "content", "content": "Paris" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ResponseChunk {
    #[serde(rename = "type", default)]
    pub chunk_type: ChunkType,

    pub content: String,
}

impl ResponseChunk {
    pub fn new(chunk_type: ChunkType, content: impl Into<String>) -> Self {
        Self {
            chunk_type,
            content: content.into(),
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self::new(ChunkType::Content, content)
    }

    pub fn session_info(content: impl Into<String>) -> Self {
        Self::new(ChunkType::SessionInfo, content)
    }

    pub fn session_end(content: impl Into<String>) -> Self {
        Self::new(ChunkType::SessionEnd, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(ChunkType::Error, content)
    }

    pub fn complete(content: impl Into<String>) -> Self {
        Self::new(ChunkType::Complete, content)
    }

    pub fn is_content(&self) -> bool {
        self.chunk_type == ChunkType::Content
    }
}

/// Result of a blocking entrypoint call.
///
/// Failures that the entrypoint chooses to report instead of raising
/// (missing credentials, empty input, captured delegate errors) come back
/// with `success: false` and an `error` message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct EntrypointResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EntrypointResponse {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: None,
            error: Some(error.into()),
        }
    }
}

/// Payload of the `session_info` chunk that opens a streaming session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct SessionInfo {
    #[ts(type = "string")]
    pub session_id: Uuid,

    pub entrypoint: String,

    #[ts(type = "string")]
    pub started_at: DateTime<Utc>,
}

impl SessionInfo {
    /// Open a new session for the named entrypoint.
    pub fn start(entrypoint: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            entrypoint: entrypoint.into(),
            started_at: Utc::now(),
        }
    }
}
