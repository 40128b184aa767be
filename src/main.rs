use std::sync::Arc;

use words_api::api::routes::router;
use words_api::api::state::AppState;
use words_api::config::settings::AppConfig;
use words_api::provision::index::ensure_index;
use words_api::search::opensearch::OpenSearchRepository;
use words_api::search::repository::SearchRepository;
use words_api::search::service::WordService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    tracing::info!("Starting words-api");
    tracing::info!("OpenSearch host: {}", config.opensearch.host);
    tracing::info!("Target index: {}", config.index);

    // 1. Search engine client:
    let repository: Arc<dyn SearchRepository> =
        Arc::new(OpenSearchRepository::new(&config.opensearch)?);

    // 2. Index provisioning (fatal if the engine never comes up):
    ensure_index(&*repository, &config.index, config.provisioning).await?;

    // 3. HTTP Router:
    let state = AppState::new(WordService::new(repository, config.index.clone()));
    let app = router(state);

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
