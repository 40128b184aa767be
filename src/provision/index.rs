use crate::config::settings::RetryPolicy;
use crate::search::repository::{IndexCreation, RepositoryError, SearchRepository};

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("could not create index '{index}' after {attempts} attempt(s): {last_error}")]
    Exhausted {
        index: String,
        attempts: u32,
        last_error: RepositoryError,
    },
}

/// Settings and mappings for the words index.
///
/// One shard, no replicas. `word` is analyzed text (with fielddata so it can be
/// aggregated on) and carries an un-analyzed `word.raw` keyword sub-field used by
/// the terms aggregation.
pub fn index_definition() -> Value {
    json!({
        "settings": {
            "index": {
                "number_of_shards": 1,
                "number_of_replicas": 0
            }
        },
        "mappings": {
            "properties": {
                "word": {
                    "type": "text",
                    "fielddata": true,
                    "fields": {
                        "raw": {
                            "type": "keyword"
                        }
                    }
                }
            }
        }
    })
}

/// Creates `index` before the service starts accepting requests.
///
/// An index that already exists counts as success. Any other failure is logged
/// and retried after `policy.delay`, up to `policy.max_attempts` attempts in total.
pub async fn ensure_index(
    repository: &dyn SearchRepository,
    index: &str,
    policy: RetryPolicy,
) -> Result<IndexCreation, ProvisionError> {
    let definition = index_definition();
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match repository.create_index(index, &definition).await {
            Ok(outcome) => {
                match outcome {
                    IndexCreation::Created => {
                        tracing::info!("Created index '{}' (attempt {})", index, attempt)
                    }
                    IndexCreation::AlreadyExists => {
                        tracing::info!("Index '{}' already exists, reusing it", index)
                    }
                }
                return Ok(outcome);
            }
            Err(e) if attempt >= max_attempts => {
                tracing::error!(
                    "Giving up on index '{}' after {} attempt(s): {}",
                    index,
                    attempt,
                    e
                );
                return Err(ProvisionError::Exhausted {
                    index: index.to_string(),
                    attempts: attempt,
                    last_error: e,
                });
            }
            Err(e) => {
                tracing::warn!(
                    "Error creating index '{}' (attempt {}/{}), retrying in {:?}: {}",
                    index,
                    attempt,
                    max_attempts,
                    policy.delay,
                    e
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
