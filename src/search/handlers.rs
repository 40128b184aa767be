use super::types::MaxBucket;
use super::validation::is_valid_word;
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::{ApiResponse, InsertPayload, SearchParams};

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

pub const RESULTS_MESSAGE: &str = "Results retrieved";
pub const NO_RESULTS_MESSAGE: &str = "No results retrieved";

/// Decodes `{"word": "<letters>"}` from the raw body and indexes it.
///
/// The body is parsed regardless of `Content-Type`.
pub async fn handle_insert_word(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, String), ApiError> {
    let payload: InsertPayload =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    if !is_valid_word(&payload.word) {
        return Err(ApiError::InvalidPayload);
    }

    state
        .words
        .insert_word(&payload.word)
        .await
        .map_err(ApiError::InsertFailed)?;

    tracing::info!("Inserted '{}' into {}", payload.word, state.words.index());
    Ok((
        StatusCode::CREATED,
        format!("Successfully inserted value: {}", payload.word),
    ))
}

pub async fn handle_search_prefix(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<MaxBucket>>, ApiError> {
    let prefix = match params.term() {
        Some(term) if is_valid_word(term) => term,
        _ => return Err(ApiError::InvalidPrefix),
    };

    let max = state
        .words
        .search_by_prefix(prefix)
        .await
        .map_err(ApiError::QueryFailed)?;

    let message = if max.is_empty() {
        NO_RESULTS_MESSAGE
    } else {
        RESULTS_MESSAGE
    };
    tracing::debug!("Prefix '{}': {} -> {:?}", prefix, message, max.keys);

    Ok(Json(ApiResponse {
        status_code: StatusCode::OK.as_u16(),
        message: message.to_string(),
        data: Some(max),
    }))
}
