//! Retrieval-augmented delegate.

use crate::agents::base::{Agent, AgentError};
use crate::response::AgentOutput;
use crate::storage::{with_storage, Document, DocumentStore};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_TOP_K: usize = 3;

/// Looks up documents related to the input and hands them, together with
/// the question, to a generator agent.
///
/// Every call opens the store, queries it and finalizes it again, whether
/// or not the generator succeeds.
#[derive(Clone)]
pub struct RagAgent {
    store: Arc<dyn DocumentStore>,
    generator: Arc<dyn Agent>,
    top_k: usize,
}

impl RagAgent {
    pub fn new(store: Arc<dyn DocumentStore>, generator: Arc<dyn Agent>) -> Self {
        Self {
            store,
            generator,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

fn build_prompt(question: &str, documents: &[Document]) -> String {
    if documents.is_empty() {
        return question.to_string();
    }

    let context = documents
        .iter()
        .map(|d| format!("[{}] {}", d.id, d.text))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Context:\n{}\n\nQuestion: {}", context, question)
}

#[async_trait]
impl Agent for RagAgent {
    async fn check_availability(&self) -> bool {
        self.generator.check_availability().await
    }

    async fn run(&self, input: &str) -> Result<AgentOutput, AgentError> {
        let top_k = self.top_k;
        let generator = self.generator.clone();

        with_storage(self.store.clone(), |store| async move {
            let documents = store.query(input, top_k).await?;
            debug!(hits = documents.len(), "retrieved documents");
            generator.run(&build_prompt(input, &documents)).await
        })
        .await
    }
}
