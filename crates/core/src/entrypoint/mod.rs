//! Entrypoints and the registry that serves them.
//!
//! An [`Entrypoint`] binds an input convention (which caller arguments feed
//! the delegate) to one delegate and a failure policy. Blocking calls
//! return an [`EntrypointResponse`]; streaming calls yield a framed
//! sequence of [`ResponseChunk`]s:
//!
//! ```text
//! session_info, content*, complete, session_end
//! ```
//!
//! A captured failure replaces `complete` with a single `error` chunk.

mod registry;

pub use registry::EntrypointRegistry;

use crate::agents::base::{Agent, AgentError};
use crate::resolver::{resolve_input, InputSpec};
use crate::response::{normalize, normalize_stream};
use ag_protocol::config_models::GlobalConfig;
use ag_protocol::entrypoint_models::{EntrypointConfig, FailurePolicy};
use ag_protocol::request_models::{ChatMessage, EntrypointRequest, Role};
use ag_protocol::response_models::{EntrypointResponse, ResponseChunk, SessionInfo};
use std::collections::BTreeMap;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

pub const NO_INPUT_MESSAGE: &str = "No input provided";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntrypointError {
    #[error("Entrypoint '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("Invalid entrypoint '{name}': {reason}")]
    InvalidConfig { name: String, reason: String },
}

/// Stream of framed response chunks.
pub type EntrypointStream =
    Pin<Box<dyn Stream<Item = Result<ResponseChunk, EntrypointError>> + Send>>;

/// A named calling convention in front of one delegate.
#[derive(Clone)]
pub struct Entrypoint {
    name: String,
    description: String,
    spec: InputSpec,
    agent: Arc<dyn Agent>,
    failure_policy: FailurePolicy,
    credential_env: Option<String>,
    env: BTreeMap<String, String>,
    streaming: bool,
}

impl Entrypoint {
    pub fn new(name: impl Into<String>, spec: InputSpec, agent: Arc<dyn Agent>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            spec,
            agent,
            failure_policy: FailurePolicy::default(),
            credential_env: None,
            env: BTreeMap::new(),
            streaming: false,
        }
    }

    /// Build an entrypoint from its definition and an already-created delegate.
    ///
    /// Definitions without their own `default` use the global default input.
    pub fn from_config(
        config: &EntrypointConfig,
        agent: Arc<dyn Agent>,
        global: &GlobalConfig,
        env: &BTreeMap<String, String>,
    ) -> Self {
        let default = config
            .default
            .clone()
            .unwrap_or_else(|| global.default_input.clone());
        let spec = InputSpec::new(config.fields.iter().cloned())
            .with_default(default)
            .with_strategy(config.strategy);

        let mut entrypoint = Self::new(config.name.clone(), spec, agent)
            .with_description(config.description.clone())
            .with_failure_policy(config.failure_policy)
            .with_env(env.clone())
            .with_streaming(config.streaming);
        entrypoint.credential_env = config.credential_env.clone();
        entrypoint
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Require `key` to be set (and non-empty) in the entrypoint's env.
    pub fn with_credential(mut self, key: impl Into<String>) -> Self {
        self.credential_env = Some(key.into());
        self
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn input_spec(&self) -> &InputSpec {
        &self.spec
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Whether callers should stream by default.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Resolve the request, run the delegate, and return its normalized answer.
    pub async fn invoke(
        &self,
        request: &EntrypointRequest,
    ) -> Result<EntrypointResponse, EntrypointError> {
        info!(entrypoint = %self.name, streaming = false, "invoking entrypoint");
        let input = resolve_input(&self.spec, request);
        self.run_input(&input).await
    }

    /// Chat-style call: the last user message is the input.
    ///
    /// Falls back to the last message of any role. An empty list returns a
    /// failure response without reaching the delegate.
    pub async fn invoke_messages(
        &self,
        messages: &[ChatMessage],
    ) -> Result<EntrypointResponse, EntrypointError> {
        info!(entrypoint = %self.name, messages = messages.len(), "invoking entrypoint with messages");
        let Some(input) = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .or_else(|| messages.last())
        else {
            return Ok(EntrypointResponse::failure(NO_INPUT_MESSAGE));
        };

        self.run_input(&input.content).await
    }

    /// Resolve the request and stream the delegate's answer as framed chunks.
    pub fn invoke_stream(&self, request: &EntrypointRequest) -> EntrypointStream {
        info!(entrypoint = %self.name, streaming = true, "invoking entrypoint");
        let input = resolve_input(&self.spec, request);
        let session = SessionInfo::start(self.name.clone());
        let missing = self.missing_credential();
        let agent = self.agent.clone();
        let policy = self.failure_policy;
        let name = self.name.clone();

        let stream = async_stream::stream! {
            let session_id = session.session_id.to_string();
            let info = serde_json::to_string(&session)
                .unwrap_or_else(|_| session_id.clone());
            yield Ok(ResponseChunk::session_info(info));

            if let Some(message) = missing {
                warn!(entrypoint = %name, error = %message, "credential missing");
                yield Ok(ResponseChunk::error(message));
                yield Ok(ResponseChunk::session_end(session_id));
                return;
            }

            let mut accumulated = String::new();
            let mut failure = None;

            if !agent.check_availability().await {
                failure = Some(not_available(&name));
            } else {
                match agent.run_stream(&input).await {
                    Ok(chunks) => {
                        let mut chunks = normalize_stream(chunks);
                        while let Some(item) = chunks.next().await {
                            match item {
                                Ok(chunk) => {
                                    accumulated.push_str(&chunk.content);
                                    yield Ok(chunk);
                                }
                                Err(e) => {
                                    failure = Some(e);
                                    break;
                                }
                            }
                        }
                    }
                    Err(e) => failure = Some(e),
                }
            }

            match failure {
                None => yield Ok(ResponseChunk::complete(accumulated)),
                Some(e) => match policy {
                    FailurePolicy::Propagate => {
                        yield Err(EntrypointError::Agent(e));
                        return;
                    }
                    FailurePolicy::Capture => {
                        warn!(entrypoint = %name, error = %e, "captured delegate failure");
                        yield Ok(ResponseChunk::error(e.to_string()));
                    }
                },
            }
            yield Ok(ResponseChunk::session_end(session_id));
        };

        Box::pin(stream)
    }

    fn missing_credential(&self) -> Option<String> {
        let key = self.credential_env.as_ref()?;
        match self.env.get(key) {
            Some(value) if !value.is_empty() => None,
            _ => Some(format!("{} is not set", key)),
        }
    }

    async fn run_input(&self, input: &str) -> Result<EntrypointResponse, EntrypointError> {
        if let Some(message) = self.missing_credential() {
            warn!(entrypoint = %self.name, error = %message, "credential missing");
            return Ok(EntrypointResponse::failure(message));
        }

        let result = if self.agent.check_availability().await {
            self.agent.run(input).await
        } else {
            Err(not_available(&self.name))
        };

        match result {
            Ok(output) => Ok(EntrypointResponse::success(normalize(&output))),
            Err(e) => match self.failure_policy {
                FailurePolicy::Propagate => Err(e.into()),
                FailurePolicy::Capture => {
                    warn!(entrypoint = %self.name, error = %e, "captured delegate failure");
                    Ok(EntrypointResponse::failure(e.to_string()))
                }
            },
        }
    }
}

fn not_available(name: &str) -> AgentError {
    AgentError::NotAvailable(format!("Delegate for '{}' is not available", name))
}
