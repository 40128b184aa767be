//! API Data Types
//!
//! Request payloads and the JSON envelope returned by the search endpoint.

use serde::{Deserialize, Serialize};

/// Body of an insert request. A missing `word` decodes as empty and then fails validation.
#[derive(Debug, Deserialize)]
pub struct InsertPayload {
    #[serde(default)]
    pub word: String,
}

/// Query string of a search request.
///
/// `prefix` is the current parameter name; `word` is still accepted from older clients.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub prefix: Option<String>,
    pub word: Option<String>,
}

impl SearchParams {
    pub fn term(&self) -> Option<&str> {
        self.prefix.as_deref().or(self.word.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}
