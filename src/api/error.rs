use crate::search::repository::RepositoryError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub const INVALID_PAYLOAD_MESSAGE: &str =
    "Invalid input payload. Needs to be format `{\"word\":\"<singleWord>\"}`.";
pub const INVALID_PREFIX_MESSAGE: &str = "Needs query parameter 'prefix'";

/// Every way a request can fail, mapped to a status and a plain-text body.
///
/// `Display` carries full detail for the log; the response body only ever
/// includes [`RepositoryError::public_reason`] for downstream failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("{}", INVALID_PAYLOAD_MESSAGE)]
    InvalidPayload,
    #[error("{}", INVALID_PREFIX_MESSAGE)]
    InvalidPrefix,
    #[error("Error inserting value: {0}")]
    InsertFailed(RepositoryError),
    #[error("Query can not be processed: {0}")]
    QueryFailed(RepositoryError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::InvalidPayload | ApiError::InvalidPrefix => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InsertFailed(_) | ApiError::QueryFailed(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn public_message(&self) -> String {
        match self {
            ApiError::InsertFailed(e) => format!("Error inserting value: {}", e.public_reason()),
            ApiError::QueryFailed(e) => {
                format!("Query can not be processed: {}", e.public_reason())
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (status, self.public_message()).into_response()
    }
}
