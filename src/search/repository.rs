//! Search Repository Abstraction
//!
//! The capability the rest of the service needs from a search engine: create an
//! index, store a document, run a query. [`super::opensearch::OpenSearchRepository`]
//! is the production implementation; [`super::memory::InMemoryRepository`] backs tests.

use super::types::{Document, SearchResult};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The engine could not be reached or did not answer in time.
    #[error("search engine unavailable: {0}")]
    Unavailable(String),
    /// The engine answered with a non-success status.
    #[error("search engine rejected request with status {status}: {reason}")]
    Rejected { status: u16, reason: String },
    /// The engine answered, but the body did not have the expected shape.
    #[error("unexpected search engine response: {0}")]
    Decode(String),
}

impl RepositoryError {
    /// Message safe to return to API callers. Carries no engine internals.
    pub fn public_reason(&self) -> &'static str {
        match self {
            RepositoryError::Unavailable(_) => "search engine unavailable",
            RepositoryError::Rejected { .. } => "search engine rejected the request",
            RepositoryError::Decode(_) => "unexpected search engine response",
        }
    }
}

/// Outcome of a successful index-create call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexCreation {
    Created,
    AlreadyExists,
}

#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// Creates `index` with the given settings/mappings body.
    async fn create_index(
        &self,
        index: &str,
        definition: &serde_json::Value,
    ) -> Result<IndexCreation, RepositoryError>;

    /// Stores `document` in `index` under an engine-assigned id.
    async fn insert(&self, index: &str, document: &Document) -> Result<(), RepositoryError>;

    async fn search(
        &self,
        indices: &[String],
        query: &serde_json::Value,
    ) -> Result<SearchResult, RepositoryError>;
}
