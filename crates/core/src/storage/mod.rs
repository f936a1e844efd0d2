//! Document storage with scoped acquisition and release.
//!
//! Stores are opened with [`DocumentStore::initialize`] and must be released
//! with [`DocumentStore::finalize`]. [`with_storage`] runs one operation
//! between the two and releases the store on every path.

mod memory;

pub use memory::MemoryStore;

use crate::agents::base::AgentError;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Store is not initialized")]
    NotInitialized,

    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Failed to release store: {0}")]
    Finalize(String),

    #[error("Storage operation failed: {0}")]
    Operation(String),
}

impl From<StorageError> for AgentError {
    fn from(e: StorageError) -> Self {
        AgentError::ExecutionError(e.to_string())
    }
}

/// A stored text document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn initialize(&self) -> Result<(), StorageError>;

    async fn insert(&self, documents: Vec<Document>) -> Result<(), StorageError>;

    /// Return up to `top_k` documents relevant to `text`, best first.
    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<Document>, StorageError>;

    async fn finalize(&self) -> Result<(), StorageError>;
}

/// Run `op` against an initialized store, then finalize it.
///
/// Finalization runs whether or not `op` succeeds. When both fail, the
/// error from `op` is returned and the finalize error is logged.
pub async fn with_storage<T, E, F, Fut>(store: Arc<dyn DocumentStore>, op: F) -> Result<T, E>
where
    F: FnOnce(Arc<dyn DocumentStore>) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<StorageError>,
{
    store.initialize().await?;
    debug!("storage initialized");

    let result = op(store.clone()).await;
    let released = store.finalize().await;
    debug!("storage finalized");

    match (result, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(finalize_error)) => {
            warn!(error = %finalize_error, "finalize failed after operation error");
            Err(e)
        }
    }
}

/// Load `documents` into `store` inside a storage scope.
pub async fn ingest(
    store: Arc<dyn DocumentStore>,
    documents: Vec<Document>,
) -> Result<usize, StorageError> {
    let count = documents.len();
    with_storage(store, |s| async move { s.insert(documents).await }).await?;
    Ok(count)
}
