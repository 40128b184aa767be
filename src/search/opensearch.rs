use super::repository::{IndexCreation, RepositoryError, SearchRepository};
use super::types::{Document, SearchResult};
use crate::config::settings::OpenSearchConfig;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

const ALREADY_EXISTS: &str = "resource_already_exists_exception";

/// [`SearchRepository`] talking to OpenSearch over its REST API.
///
/// Holds one pooled `reqwest::Client`; cloning the repository shares the pool.
#[derive(Clone)]
pub struct OpenSearchRepository {
    http_client: reqwest::Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl OpenSearchRepository {
    pub fn new(config: &OpenSearchConfig) -> Result<Self, RepositoryError> {
        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(config.timeout)
            .build()
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.host.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.username {
            Some(user) => request.basic_auth(user, self.password.as_deref()),
            None => request,
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, RepositoryError> {
        self.with_auth(request)
            .send()
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RepositoryError> {
        response
            .json::<T>()
            .await
            .map_err(|e| RepositoryError::Decode(e.to_string()))
    }
}

/// Pulls `error.type` and `error.reason` out of an OpenSearch error body.
fn error_details(body: &str) -> (Option<String>, String) {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    let kind = error
        .and_then(|e| e.get("type"))
        .and_then(|t| t.as_str())
        .map(str::to_string);
    let reason = error
        .and_then(|e| e.get("reason").and_then(|r| r.as_str()).or_else(|| e.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());

    (kind, reason)
}

async fn rejection(response: reqwest::Response) -> (StatusCode, Option<String>, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let (kind, reason) = error_details(&body);
    (status, kind, reason)
}

#[async_trait]
impl SearchRepository for OpenSearchRepository {
    async fn create_index(
        &self,
        index: &str,
        definition: &serde_json::Value,
    ) -> Result<IndexCreation, RepositoryError> {
        let response = self
            .send(self.http_client.put(self.url(index)).json(definition))
            .await?;

        if response.status().is_success() {
            return Ok(IndexCreation::Created);
        }

        let (status, kind, reason) = rejection(response).await;
        if status == StatusCode::BAD_REQUEST && kind.as_deref() == Some(ALREADY_EXISTS) {
            return Ok(IndexCreation::AlreadyExists);
        }

        Err(RepositoryError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }

    async fn insert(&self, index: &str, document: &Document) -> Result<(), RepositoryError> {
        let response = self
            .send(
                self.http_client
                    .post(self.url(&format!("{}/_doc", index)))
                    .json(document),
            )
            .await?;

        if !response.status().is_success() {
            let (status, _, reason) = rejection(response).await;
            return Err(RepositoryError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        tracing::debug!("Indexed document into {}", index);
        Ok(())
    }

    async fn search(
        &self,
        indices: &[String],
        query: &serde_json::Value,
    ) -> Result<SearchResult, RepositoryError> {
        let target = indices.join(",");
        let response = self
            .send(
                self.http_client
                    .post(self.url(&format!("{}/_search", target)))
                    .json(query),
            )
            .await?;

        if !response.status().is_success() {
            let (status, _, reason) = rejection(response).await;
            return Err(RepositoryError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        Self::decode(response).await
    }
}
