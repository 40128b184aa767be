use super::state::AppState;
use crate::search::handlers::{handle_insert_word, handle_search_prefix};

use axum::{
    Router,
    routing::{get, post},
};

pub const HEALTH_MESSAGE: &str = "OK: words-api is running";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/post", post(handle_insert_word))
        .route("/words", post(handle_insert_word))
        .route("/get", get(handle_search_prefix))
        .route("/search", get(handle_search_prefix))
        .route("/health", get(handle_health))
        .with_state(state)
}

pub async fn handle_health() -> &'static str {
    HEALTH_MESSAGE
}
