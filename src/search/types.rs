//! Search Data Types
//!
//! The document stored for every accepted word, and the subset of an OpenSearch
//! `_search` response this service decodes.

use serde::{Deserialize, Deserializer, Serialize};

/// Name of the terms aggregation over `word.raw`.
pub const TERMS_AGGREGATION: &str = "distinct_value_count";
/// Name of the max-bucket reduction over [`TERMS_AGGREGATION`].
pub const MAX_BUCKET_AGGREGATION: &str = "max_distinct_counts";

/// A single indexed word. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub word: String,
}

impl Document {
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub doc_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermsAggregation {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
    #[serde(default)]
    pub doc_count_error_upper_bound: u64,
    #[serde(default)]
    pub sum_other_doc_count: u64,
}

/// Result of the max-bucket reduction: the most frequent term(s) and their count.
///
/// The engine reports `"value": null` when no bucket matched; that decodes as `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaxBucket {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub value: f64,
}

impl MaxBucket {
    pub fn is_empty(&self) -> bool {
        self.value == 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregations {
    #[serde(default)]
    pub distinct_value_count: TermsAggregation,
    #[serde(default)]
    pub max_distinct_counts: MaxBucket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "_source", default)]
    pub source: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub hits: Hits,
    #[serde(default)]
    pub aggregations: Aggregations,
}

impl SearchResult {
    /// Wraps a precomputed max-bucket value, leaving everything else empty.
    pub fn from_max_bucket(keys: Vec<String>, value: f64) -> Self {
        Self {
            aggregations: Aggregations {
                max_distinct_counts: MaxBucket { keys, value },
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
