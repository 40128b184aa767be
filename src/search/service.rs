use super::query::build_prefix_query;
use super::repository::{RepositoryError, SearchRepository};
use super::types::{Document, MaxBucket};

use std::sync::Arc;

/// Binds a [`SearchRepository`] to the index this process serves.
///
/// Callers hand it already-validated input; it builds the document or query and
/// forwards to the repository.
pub struct WordService {
    repository: Arc<dyn SearchRepository>,
    index: String,
}

impl WordService {
    pub fn new(repository: Arc<dyn SearchRepository>, index: impl Into<String>) -> Self {
        Self {
            repository,
            index: index.into(),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub async fn insert_word(&self, word: &str) -> Result<(), RepositoryError> {
        let document = Document::new(word);
        self.repository.insert(&self.index, &document).await
    }

    /// Most frequent stored word(s) starting with `prefix`, case-insensitively.
    pub async fn search_by_prefix(&self, prefix: &str) -> Result<MaxBucket, RepositoryError> {
        let query = build_prefix_query(prefix);
        let indices = [self.index.clone()];
        let result = self.repository.search(&indices, &query).await?;

        tracing::debug!(
            "Prefix '{}' matched {} bucket(s)",
            prefix,
            result.aggregations.distinct_value_count.buckets.len()
        );

        Ok(result.aggregations.max_distinct_counts)
    }
}
