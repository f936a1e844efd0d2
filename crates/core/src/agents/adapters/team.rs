//! Round-robin multi-agent team.

use crate::agents::base::{Agent, AgentError, AgentStream};
use crate::response::{normalize, AgentOutput};
use ag_protocol::request_models::ChatMessage;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_MAX_TURNS: usize = 4;

/// A named participant in a [`RoundRobinTeam`].
#[derive(Clone)]
pub struct TeamMember {
    pub name: String,
    pub agent: Arc<dyn Agent>,
}

impl TeamMember {
    pub fn new(name: impl Into<String>, agent: Arc<dyn Agent>) -> Self {
        Self {
            name: name.into(),
            agent,
        }
    }
}

/// Members speak in turn, each receiving the previous message as input.
///
/// The conversation ends after `max_turns` turns, or as soon as a message
/// contains the termination phrase. The result is the whole transcript.
#[derive(Clone)]
pub struct RoundRobinTeam {
    members: Vec<TeamMember>,
    max_turns: usize,
    termination: Option<String>,
}

impl RoundRobinTeam {
    pub fn new(members: Vec<TeamMember>) -> Self {
        Self {
            members,
            max_turns: DEFAULT_MAX_TURNS,
            termination: None,
        }
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// End the conversation once a message contains `phrase`.
    pub fn with_termination(mut self, phrase: impl Into<String>) -> Self {
        self.termination = Some(phrase.into());
        self
    }

    fn ensure_runnable(&self) -> Result<(), AgentError> {
        if self.members.is_empty() {
            return Err(AgentError::ExecutionError("Team has no members".to_string()));
        }
        if self.max_turns == 0 {
            return Err(AgentError::ExecutionError(
                "Team max_turns must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn is_terminated(termination: Option<&str>, message: &ChatMessage) -> bool {
        termination.is_some_and(|phrase| message.content.contains(phrase))
    }

    async fn take_turn(member: &TeamMember, prompt: &str) -> Result<ChatMessage, AgentError> {
        debug!(member = %member.name, "team member taking turn");
        let output = member.agent.run(prompt).await?;
        Ok(ChatMessage::assistant(normalize(&output)).with_name(member.name.clone()))
    }
}

#[async_trait]
impl Agent for RoundRobinTeam {
    async fn check_availability(&self) -> bool {
        if self.ensure_runnable().is_err() {
            return false;
        }
        for member in &self.members {
            if !member.agent.check_availability().await {
                return false;
            }
        }
        true
    }

    async fn run(&self, input: &str) -> Result<AgentOutput, AgentError> {
        self.ensure_runnable()?;

        let mut transcript = vec![ChatMessage::user(input)];
        for turn in 0..self.max_turns {
            let member = &self.members[turn % self.members.len()];
            let prompt = transcript
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();

            let message = Self::take_turn(member, &prompt).await?;
            let done = Self::is_terminated(self.termination.as_deref(), &message);
            transcript.push(message);
            if done {
                break;
            }
        }

        Ok(AgentOutput::Conversation(transcript))
    }

    async fn run_stream(&self, input: &str) -> Result<AgentStream, AgentError> {
        self.ensure_runnable()?;

        let team = self.clone();
        let mut prompt = input.to_string();
        let stream = async_stream::stream! {
            for turn in 0..team.max_turns {
                let member = &team.members[turn % team.members.len()];
                let message = match Self::take_turn(member, &prompt).await {
                    Ok(message) => message,
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                };

                let done = Self::is_terminated(team.termination.as_deref(), &message);
                prompt = message.content.clone();
                yield Ok(AgentOutput::Message { content: message.content });
                if done {
                    break;
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
