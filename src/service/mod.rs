//! News Service Module
//!
//! The six operations exposed to the request layer, each driving the store
//! and search gateways it was constructed with.
//!
//! ## Components
//! - **`seeder`**: Synthetic data, upserted by url in fixed batches.
//! - **`reindex`**: Store-to-store backfill pass and store-to-search mirroring pass.
//! - **`query`**: Relevance search against the search index.
//! - **`listing`**: Paginated listing from the primary store, and clearing it.
//!
//! Components never call each other; `NewsService` only bundles them.

pub mod listing;
pub mod query;
pub mod reindex;
pub mod seeder;
pub mod types;


use crate::error::ServiceError;
use crate::news::types::{News, Paginated};
use crate::search::gateway::SearchIndex;
use crate::storage::gateway::RecordStore;
use listing::ListingService;
use query::SearchQueryService;
use reindex::{SearchReindexer, StoreReindexer};
use seeder::Seeder;
use std::sync::Arc;
use types::{ClearReport, ReindexReport, SeedReport};

pub struct NewsService {
    listing: ListingService,
    query: SearchQueryService,
    store_reindexer: StoreReindexer,
    search_reindexer: SearchReindexer,
    seeder: Seeder,
    batch_size: usize,
}

impl NewsService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        search: Arc<dyn SearchIndex>,
        index_name: &str,
        batch_size: usize,
    ) -> Self {
        Self::with_seeder(
            store.clone(),
            search,
            index_name,
            batch_size,
            Seeder::new(store),
        )
    }

    pub fn with_seeder(
        store: Arc<dyn RecordStore>,
        search: Arc<dyn SearchIndex>,
        index_name: &str,
        batch_size: usize,
        seeder: Seeder,
    ) -> Self {
        Self {
            listing: ListingService::new(store.clone()),
            query: SearchQueryService::new(search.clone(), index_name),
            store_reindexer: StoreReindexer::new(store.clone()),
            search_reindexer: SearchReindexer::new(store, search, index_name),
            seeder,
            batch_size,
        }
    }

    pub async fn clear_data(&self) -> Result<ClearReport, ServiceError> {
        self.listing.clear_data().await
    }

    pub async fn re_index(&self) -> Result<ReindexReport, ServiceError> {
        self.store_reindexer.re_index(self.batch_size).await
    }

    pub async fn re_index_to_search(&self) -> Result<ReindexReport, ServiceError> {
        self.search_reindexer
            .re_index_to_search(self.batch_size)
            .await
    }

    pub async fn search(
        &self,
        query: &str,
        page: u64,
        limit: u64,
    ) -> Result<Paginated<News>, ServiceError> {
        self.query.search(query, page, limit).await
    }

    pub async fn run_seed(&self, max_records: u64) -> Result<SeedReport, ServiceError> {
        self.seeder.run_seed(max_records, self.batch_size).await
    }

    pub async fn get_news(
        &self,
        page: u64,
        limit: u64,
        search: Option<&str>,
    ) -> Result<Paginated<News>, ServiceError> {
        self.listing.get_news(page, limit, search).await
    }
}
