//! Chat-completion adapter for OpenAI-compatible providers.

use crate::agents::base::{Agent, AgentError, AgentStream};
use crate::response::AgentOutput;
use ag_protocol::request_models::ChatMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Sends the resolved input as a single user message to a
/// `/chat/completions` endpoint.
pub struct ChatCompletionAgent {
    model: String,
    system_prompt: String,
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<serde_json::Value>,
    #[serde(default)]
    delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// One line of a server-sent-events body.
#[derive(Debug, PartialEq, Eq)]
enum SseLine {
    Skip,
    Done,
    Delta(String),
}

impl ChatCompletionAgent {
    /// Create a new chat adapter.
    ///
    /// # Arguments
    ///
    /// * `model` - Model identifier forwarded to the provider
    /// * `system_prompt` - Sent as a system message when not empty
    pub fn new(model: String, system_prompt: String) -> Self {
        Self {
            model,
            system_prompt,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_messages(&self, input: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if !self.system_prompt.trim().is_empty() {
            messages.push(ChatMessage::system(self.system_prompt.trim()));
        }
        messages.push(ChatMessage::user(input));
        messages
    }

    async fn send(&self, input: &str, stream: bool) -> Result<reqwest::Response, AgentError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: self.build_messages(input),
            stream,
        };

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!(model = %self.model, stream, "sending chat completion request");
        let response = request
            .send()
            .await
            .map_err(|e| AgentError::ApiError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::ApiError(format!("{}: {}", status, body)));
        }

        Ok(response)
    }
}

fn parse_sse_line(line: &str) -> Result<SseLine, AgentError> {
    let line = line.trim();
    let Some(data) = line.strip_prefix("data:") else {
        return Ok(SseLine::Skip);
    };
    let data = data.trim();
    if data == "[DONE]" {
        return Ok(SseLine::Done);
    }

    let chunk: ChatCompletionResponse = serde_json::from_str(data).map_err(|e| {
        AgentError::StreamParseError(format!("Failed to parse SSE data: {} (data: {})", e, data))
    })?;

    let content = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta)
        .and_then(|d| d.content)
        .unwrap_or_default();

    if content.is_empty() {
        Ok(SseLine::Skip)
    } else {
        Ok(SseLine::Delta(content))
    }
}

/// Accumulates raw response bytes and hands back complete lines.
///
/// Lines are decoded only once their terminating newline has arrived, so a
/// multi-byte character split across network chunks stays intact.
#[derive(Debug, Default)]
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(line_end) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=line_end).collect();
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }
}

#[async_trait]
impl Agent for ChatCompletionAgent {
    async fn check_availability(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    async fn run(&self, input: &str) -> Result<AgentOutput, AgentError> {
        let response = self.send(input, false).await?;
        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AgentError::ApiError(format!("Invalid response body: {}", e)))?;

        let message = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .ok_or_else(|| AgentError::ApiError("Response contained no choices".to_string()))?;

        Ok(AgentOutput::from_value(message))
    }

    async fn run_stream(&self, input: &str) -> Result<AgentStream, AgentError> {
        let response = self.send(input, true).await?;
        let mut bytes = Box::pin(response.bytes_stream());

        let stream = async_stream::stream! {
            let mut buffer = LineBuffer::default();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(AgentError::StreamParseError(format!("Stream read error: {}", e)));
                        return;
                    }
                };
                for line in buffer.push(&chunk) {
                    match parse_sse_line(&line) {
                        Ok(SseLine::Skip) => {}
                        Ok(SseLine::Done) => return,
                        Ok(SseLine::Delta(content)) => yield Ok(AgentOutput::Plain(content)),
                        Err(e) => yield Err(e),
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
