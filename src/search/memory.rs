use super::query::{TERMS_SIZE, prefix_of};
use super::repository::{IndexCreation, RepositoryError, SearchRepository};
use super::types::{
    Aggregations, Bucket, Document, Hits, MaxBucket, SearchResult, TermsAggregation,
};

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// In-process [`SearchRepository`] for tests and local runs without a cluster.
///
/// Understands only the query shape produced by `build_prefix_query`: a
/// case-insensitive prefix filter on `word`, top-10 terms by count, and the
/// max-bucket over them. Outages can be simulated with [`Self::set_unavailable`]
/// and [`Self::fail_next_creates`].
#[derive(Default)]
pub struct InMemoryRepository {
    indices: DashMap<String, Vec<Document>>,
    unavailable: AtomicBool,
    pending_create_failures: AtomicU32,
    create_calls: AtomicU32,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every call fails with [`RepositoryError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes the next `count` calls to `create_index` fail.
    pub fn fail_next_creates(&self, count: u32) {
        self.pending_create_failures.store(count, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> u32 {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn has_index(&self, index: &str) -> bool {
        self.indices.contains_key(index)
    }

    pub fn document_count(&self, index: &str) -> usize {
        self.indices.get(index).map(|docs| docs.len()).unwrap_or(0)
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "in-memory repository marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

/// Groups words by exact value and orders buckets the way OpenSearch does:
/// count descending, then key ascending.
fn top_terms<'a>(words: impl Iterator<Item = &'a str>) -> Vec<Bucket> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for word in words {
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut buckets: Vec<Bucket> = counts
        .into_iter()
        .map(|(key, doc_count)| Bucket {
            key: key.to_string(),
            doc_count,
        })
        .collect();
    buckets.sort_by(|a, b| b.doc_count.cmp(&a.doc_count).then_with(|| a.key.cmp(&b.key)));
    buckets
}

fn max_bucket(buckets: &[Bucket]) -> MaxBucket {
    let Some(max) = buckets.iter().map(|b| b.doc_count).max() else {
        return MaxBucket::default();
    };

    MaxBucket {
        keys: buckets
            .iter()
            .filter(|b| b.doc_count == max)
            .map(|b| b.key.clone())
            .collect(),
        value: max as f64,
    }
}

#[async_trait]
impl SearchRepository for InMemoryRepository {
    async fn create_index(
        &self,
        index: &str,
        _definition: &serde_json::Value,
    ) -> Result<IndexCreation, RepositoryError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let failed = self
            .pending_create_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(RepositoryError::Unavailable(
                "simulated index creation failure".to_string(),
            ));
        }

        if self.indices.contains_key(index) {
            return Ok(IndexCreation::AlreadyExists);
        }
        self.indices.insert(index.to_string(), Vec::new());
        Ok(IndexCreation::Created)
    }

    async fn insert(&self, index: &str, document: &Document) -> Result<(), RepositoryError> {
        self.check_available()?;
        // Like OpenSearch, indexing into a missing index creates it
        self.indices
            .entry(index.to_string())
            .or_default()
            .push(document.clone());
        Ok(())
    }

    async fn search(
        &self,
        indices: &[String],
        query: &serde_json::Value,
    ) -> Result<SearchResult, RepositoryError> {
        self.check_available()?;

        let prefix = prefix_of(query)
            .ok_or_else(|| RepositoryError::Rejected {
                status: 400,
                reason: "query has no prefix filter on word".to_string(),
            })?
            .to_lowercase();

        let mut matched: Vec<Document> = Vec::new();
        for index in indices {
            let docs = self.indices.get(index).ok_or_else(|| RepositoryError::Rejected {
                status: 404,
                reason: format!("no such index [{}]", index),
            })?;
            matched.extend(
                docs.iter()
                    .filter(|d| d.word.to_lowercase().starts_with(&prefix))
                    .cloned(),
            );
        }

        let all_buckets = top_terms(matched.iter().map(|d| d.word.as_str()));
        let kept = all_buckets.len().min(TERMS_SIZE as usize);
        let sum_other_doc_count = all_buckets[kept..].iter().map(|b| b.doc_count).sum();
        let buckets = all_buckets[..kept].to_vec();

        Ok(SearchResult {
            // Queries are sent with `size: 0`, so no hits come back
            hits: Hits::default(),
            aggregations: Aggregations {
                max_distinct_counts: max_bucket(&buckets),
                distinct_value_count: TermsAggregation {
                    buckets,
                    doc_count_error_upper_bound: 0,
                    sum_other_doc_count,
                },
            },
        })
    }
}
