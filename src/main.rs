use news_index::api;
use news_index::config::AppConfig;
use news_index::search::elastic::ElasticsearchIndex;
use news_index::search::gateway::SearchIndex;
use news_index::search::memory::MemorySearchIndex;
use news_index::service::NewsService;
use news_index::storage::gateway::RecordStore;
use news_index::storage::memory::MemoryRecordStore;
use news_index::storage::mongo::MongoRecordStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::load()?;

    // 1. Primary store:
    let store: Arc<dyn RecordStore> = match &config.mongodb_url {
        Some(url) => Arc::new(MongoRecordStore::connect(url).await?),
        None => {
            tracing::info!("MONGODB_URL not set, using in-memory primary store");
            Arc::new(MemoryRecordStore::new())
        }
    };

    // 2. Search index:
    let search: Arc<dyn SearchIndex> = match &config.elasticsearch_url {
        Some(url) => {
            tracing::info!("Using Elasticsearch at {}", url);
            Arc::new(ElasticsearchIndex::new(url.clone())?)
        }
        None => {
            tracing::info!("ELASTICSEARCH_URL not set, using in-memory search index");
            Arc::new(MemorySearchIndex::new())
        }
    };

    // 3. Services:
    let service = Arc::new(NewsService::new(
        store,
        search,
        &config.index_name,
        config.batch_size,
    ));

    // 4. HTTP server:
    let app = api::router(service, config.seed_default);

    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
