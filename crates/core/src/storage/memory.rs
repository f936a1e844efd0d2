//! In-memory keyword store.

use super::{Document, DocumentStore, StorageError};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    open: bool,
    documents: Vec<Document>,
}

/// Keeps documents in memory and ranks them by shared keywords.
///
/// Documents survive finalization, so a store can be reopened by a later
/// scope and still answer queries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
    finalized: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the store has been finalized.
    pub fn finalize_count(&self) -> usize {
        self.finalized.load(Ordering::SeqCst)
    }

    pub async fn is_open(&self) -> bool {
        self.inner.lock().await.open
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.documents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn keywords(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2)
        .map(str::to_lowercase)
        .collect()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn initialize(&self) -> Result<(), StorageError> {
        self.inner.lock().await.open = true;
        Ok(())
    }

    async fn insert(&self, documents: Vec<Document>) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        if !inner.open {
            return Err(StorageError::NotInitialized);
        }
        for doc in documents {
            match inner.documents.iter_mut().find(|d| d.id == doc.id) {
                Some(existing) => *existing = doc,
                None => inner.documents.push(doc),
            }
        }
        Ok(())
    }

    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<Document>, StorageError> {
        let inner = self.inner.lock().await;
        if !inner.open {
            return Err(StorageError::NotInitialized);
        }

        let wanted = keywords(text);
        let mut scored: Vec<(usize, &Document)> = inner
            .documents
            .iter()
            .map(|doc| (keywords(&doc.text).intersection(&wanted).count(), doc))
            .filter(|(score, _)| *score > 0)
            .collect();
        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    async fn finalize(&self) -> Result<(), StorageError> {
        self.inner.lock().await.open = false;
        self.finalized.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
