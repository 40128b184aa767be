//! Search Module Tests
//!
//! Validates the pieces this service owns on the search path.
//!
//! ## Test Scopes
//! - **Validation**: Letters-only acceptance, no normalization.
//! - **Query**: Shape of the prefix/terms/max-bucket request body.
//! - **Types**: Decoding of OpenSearch `_search` responses, including empty aggregations.
//! - **InMemoryRepository / WordService**: Prefix matching, bucketing and max-bucket selection.

#[cfg(test)]
mod tests {
    use crate::search::memory::InMemoryRepository;
    use crate::search::query::{build_prefix_query, prefix_of};
    use crate::search::repository::{IndexCreation, RepositoryError, SearchRepository};
    use crate::search::service::WordService;
    use crate::search::types::{Document, SearchResult};
    use crate::search::validation::is_valid_word;
    use std::sync::Arc;

    // ============================================================
    // VALIDATION TESTS
    // ============================================================

    #[test]
    fn test_valid_words_are_accepted() {
        for word in ["a", "Hello", "hello", "HELLO", "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ"] {
            assert!(is_valid_word(word), "{:?} should be valid", word);
        }
    }

    #[test]
    fn test_invalid_words_are_rejected() {
        let cases = [
            "",
            "Hello123",
            "Hello!",
            "two words",
            " leading",
            "trailing ",
            "tab\t",
            "new\nline",
            "hyphen-ated",
            "under_score",
            "café",
            "Straße",
            "\"quoted\"",
        ];

        for word in cases {
            assert!(!is_valid_word(word), "{:?} should be invalid", word);
        }
    }

    // ============================================================
    // QUERY BUILDER TESTS
    // ============================================================

    #[test]
    fn test_prefix_query_shape() {
        let query = build_prefix_query("hel");

        assert_eq!(query["size"], 0);

        let prefix = &query["query"]["bool"]["filter"]["prefix"]["word"];
        assert_eq!(prefix["value"], "hel");
        assert_eq!(prefix["case_insensitive"], true);

        let terms = &query["aggs"]["distinct_value_count"]["terms"];
        assert_eq!(terms["field"], "word.raw");
        assert_eq!(terms["size"], 10);

        assert_eq!(
            query["aggs"]["max_distinct_counts"]["max_bucket"]["buckets_path"],
            "distinct_value_count>_count"
        );
    }

    #[test]
    fn test_prefix_query_embeds_term_as_json_string() {
        // Never reached through the API (validation rejects it), but the builder
        // must not be injectable either way.
        let term = r#"x", "case_insensitive": false, "y": ""#;
        let query = build_prefix_query(term);

        assert_eq!(prefix_of(&query), Some(term));
        assert_eq!(
            query["query"]["bool"]["filter"]["prefix"]["word"]["case_insensitive"],
            true
        );
    }

    // ============================================================
    // TYPES TESTS - response decoding
    // ============================================================

    #[test]
    fn test_decode_search_response_with_results() {
        let body = serde_json::json!({
            "took": 3,
            "hits": { "total": { "value": 4, "relation": "eq" }, "hits": [] },
            "aggregations": {
                "distinct_value_count": {
                    "doc_count_error_upper_bound": 0,
                    "sum_other_doc_count": 0,
                    "buckets": [
                        { "key": "hello", "doc_count": 3 },
                        { "key": "help", "doc_count": 1 }
                    ]
                },
                "max_distinct_counts": { "value": 3.0, "keys": ["hello"] }
            }
        });

        let result: SearchResult = serde_json::from_value(body).unwrap();
        let aggs = &result.aggregations;

        assert_eq!(aggs.distinct_value_count.buckets.len(), 2);
        assert_eq!(aggs.distinct_value_count.buckets[0].key, "hello");
        assert_eq!(aggs.distinct_value_count.buckets[0].doc_count, 3);
        assert_eq!(aggs.max_distinct_counts.keys, vec!["hello".to_string()]);
        assert_eq!(aggs.max_distinct_counts.value, 3.0);
        assert!(!aggs.max_distinct_counts.is_empty());
    }

    #[test]
    fn test_decode_null_max_bucket_as_zero() {
        let body = r#"{
            "hits": { "hits": [] },
            "aggregations": {
                "distinct_value_count": { "doc_count_error_upper_bound": 0, "sum_other_doc_count": 0, "buckets": [] },
                "max_distinct_counts": { "value": null, "keys": [] }
            }
        }"#;

        let result: SearchResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.aggregations.max_distinct_counts.value, 0.0);
        assert!(result.aggregations.max_distinct_counts.keys.is_empty());
        assert!(result.aggregations.max_distinct_counts.is_empty());
    }

    #[test]
    fn test_decode_response_without_aggregations() {
        let result: SearchResult = serde_json::from_str(r#"{"hits":{"hits":[]}}"#).unwrap();

        assert!(result.aggregations.max_distinct_counts.is_empty());
        assert!(result.aggregations.distinct_value_count.buckets.is_empty());
    }

    #[test]
    fn test_decode_hit_source() {
        let body = r#"{"hits":{"hits":[{"_index":"words","_id":"abc","_source":{"word":"hello"}}]}}"#;
        let result: SearchResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.hits.hits[0].source["word"], "hello");
    }

    #[test]
    fn test_document_serializes_single_field() {
        let json = serde_json::to_string(&Document::new("hello")).unwrap();
        assert_eq!(json, r#"{"word":"hello"}"#);
    }

    // ============================================================
    // IN-MEMORY REPOSITORY TESTS
    // ============================================================

    async fn seeded(words: &[&str]) -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        repo.create_index("words", &serde_json::json!({})).await.unwrap();
        for word in words {
            repo.insert("words", &Document::new(*word)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_create_index_reports_existing() {
        let repo = InMemoryRepository::new();
        let definition = serde_json::json!({});

        assert_eq!(
            repo.create_index("words", &definition).await.unwrap(),
            IndexCreation::Created
        );
        assert_eq!(
            repo.create_index("words", &definition).await.unwrap(),
            IndexCreation::AlreadyExists
        );
        assert_eq!(repo.create_calls(), 2);
    }

    #[tokio::test]
    async fn test_search_picks_most_frequent_prefix_match() {
        let repo = seeded(&["hello", "hello", "hello", "help", "Helmet", "world", "world", "world", "world"]).await;
        let indices = vec!["words".to_string()];

        let result = repo.search(&indices, &build_prefix_query("HEL")).await.unwrap();
        let max = &result.aggregations.max_distinct_counts;

        assert_eq!(max.keys, vec!["hello".to_string()]);
        assert_eq!(max.value, 3.0);
        // "world" is more frequent overall but does not match the prefix
        assert_eq!(result.aggregations.distinct_value_count.buckets.len(), 3);
    }

    #[tokio::test]
    async fn test_search_ties_surface_every_key() {
        let repo = seeded(&["cat", "car", "car", "cat"]).await;
        let indices = vec!["words".to_string()];

        let result = repo.search(&indices, &build_prefix_query("ca")).await.unwrap();
        let max = &result.aggregations.max_distinct_counts;

        assert_eq!(max.keys, vec!["car".to_string(), "cat".to_string()]);
        assert_eq!(max.value, 2.0);
    }

    #[tokio::test]
    async fn test_search_without_matches_yields_zero() {
        let repo = seeded(&["apple"]).await;
        let indices = vec!["words".to_string()];

        let result = repo.search(&indices, &build_prefix_query("zz")).await.unwrap();

        assert!(result.aggregations.max_distinct_counts.is_empty());
        assert!(result.aggregations.max_distinct_counts.keys.is_empty());
    }

    #[tokio::test]
    async fn test_search_keeps_only_top_ten_terms() {
        let words: Vec<String> = (0..12)
            .map(|i| format!("a{}", (b'a' + i as u8) as char))
            .collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let repo = seeded(&refs).await;
        let indices = vec!["words".to_string()];

        let result = repo.search(&indices, &build_prefix_query("a")).await.unwrap();
        let terms = &result.aggregations.distinct_value_count;

        assert_eq!(terms.buckets.len(), 10);
        assert_eq!(terms.sum_other_doc_count, 2);
    }

    #[tokio::test]
    async fn test_search_missing_index_is_rejected() {
        let repo = InMemoryRepository::new();
        let indices = vec!["nope".to_string()];

        let result = repo.search(&indices, &build_prefix_query("a")).await;

        assert!(matches!(result, Err(RepositoryError::Rejected { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_unavailable_repository_fails_every_call() {
        let repo = seeded(&[]).await;
        repo.set_unavailable(true);

        let insert = repo.insert("words", &Document::new("hello")).await;
        assert!(matches!(insert, Err(RepositoryError::Unavailable(_))));

        repo.set_unavailable(false);
        assert!(repo.insert("words", &Document::new("hello")).await.is_ok());
        assert_eq!(repo.document_count("words"), 1);
    }

    #[test]
    fn test_public_reason_hides_details() {
        let err = RepositoryError::Rejected {
            status: 401,
            reason: "security_exception: missing credentials for user admin".to_string(),
        };

        assert_eq!(err.public_reason(), "search engine rejected the request");
        assert!(err.to_string().contains("401"));
    }

    // ============================================================
    // WORD SERVICE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_service_round_trip_through_repository() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = WordService::new(repo.clone(), "words");

        service.insert_word("Rust").await.unwrap();
        service.insert_word("rust").await.unwrap();
        service.insert_word("rust").await.unwrap();
        service.insert_word("rusty").await.unwrap();

        let max = service.search_by_prefix("RUS").await.unwrap();

        assert_eq!(service.index(), "words");
        assert_eq!(repo.document_count("words"), 4);
        assert_eq!(max.keys, vec!["rust".to_string()]);
        assert_eq!(max.value, 2.0);
    }
}
