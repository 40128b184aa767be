use super::types::{MAX_BUCKET_AGGREGATION, TERMS_AGGREGATION};
use serde_json::{Value, json};

/// Field the prefix filter runs against (analyzed text).
pub const WORD_FIELD: &str = "word";
/// Keyword sub-field used for exact-term bucketing.
pub const RAW_WORD_FIELD: &str = "word.raw";
/// Number of distinct terms the terms aggregation keeps.
pub const TERMS_SIZE: u32 = 10;

/// Builds the aggregation query returning the most frequent word starting with `term`.
///
/// Hits are suppressed (`size: 0`); only the aggregations matter. The term is
/// embedded as a JSON string value, so quoting in the input cannot alter the query.
pub fn build_prefix_query(term: &str) -> Value {
    json!({
        "size": 0,
        "query": {
            "bool": {
                "filter": {
                    "prefix": {
                        WORD_FIELD: {
                            "value": term,
                            "case_insensitive": true
                        }
                    }
                }
            }
        },
        "aggs": {
            TERMS_AGGREGATION: {
                "terms": {
                    "field": RAW_WORD_FIELD,
                    "size": TERMS_SIZE
                }
            },
            MAX_BUCKET_AGGREGATION: {
                "max_bucket": {
                    "buckets_path": format!("{}>_count", TERMS_AGGREGATION)
                }
            }
        }
    })
}

/// Reads the prefix back out of a query produced by [`build_prefix_query`].
pub fn prefix_of(query: &Value) -> Option<&str> {
    query
        .pointer("/query/bool/filter/prefix/word/value")
        .and_then(Value::as_str)
}
