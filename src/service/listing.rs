use super::types::ClearReport;
use crate::error::{ServiceError, log_and_fail};
use crate::news::types::{News, Paginated};
use crate::storage::gateway::{NewsFilter, RecordStore};

use anyhow::Result;
use std::sync::Arc;

/// Paginated listing straight from the primary store, plus collection reset.
///
/// The optional search here uses the store's own text predicate, independent
/// of the search index.
pub struct ListingService {
    store: Arc<dyn RecordStore>,
}

impl ListingService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get_news(
        &self,
        page: u64,
        limit: u64,
        search: Option<&str>,
    ) -> Result<Paginated<News>, ServiceError> {
        self.list(page, limit, search)
            .await
            .map_err(log_and_fail("Error fetching news", ServiceError::FetchNews))
    }

    pub async fn clear_data(&self) -> Result<ClearReport, ServiceError> {
        let deleted = self
            .store
            .delete_all()
            .await
            .map_err(log_and_fail("Error clearing data", ServiceError::ClearData))?;

        tracing::info!("Data cleared successfully ({} records)", deleted);
        Ok(ClearReport { deleted })
    }

    async fn list(&self, page: u64, limit: u64, search: Option<&str>) -> Result<Paginated<News>> {
        let filter = NewsFilter::from_search(search);
        let skip = page.saturating_sub(1).saturating_mul(limit);

        // Independent reads; no snapshot ties them together.
        let (data, total) = tokio::try_join!(
            self.store.page(&filter, None, skip, limit),
            self.store.count(&filter),
        )?;

        tracing::info!("Search query: {:?}", filter);
        tracing::info!("Total records found: {}", total);

        Ok(Paginated { data, total })
    }
}
