use crate::search::service::WordService;
use std::sync::Arc;

/// Shared state handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub words: Arc<WordService>,
}

impl AppState {
    pub fn new(words: WordService) -> Self {
        Self {
            words: Arc::new(words),
        }
    }
}
