use crate::error::{ServiceError, log_and_fail};
use crate::news::types::{News, Paginated};
use crate::search::gateway::{SearchIndex, SearchRequest};

use anyhow::Result;
use std::sync::Arc;

/// Relevance search against the search index.
pub struct SearchQueryService {
    search: Arc<dyn SearchIndex>,
    index_name: String,
}

impl SearchQueryService {
    pub fn new(search: Arc<dyn SearchIndex>, index_name: impl Into<String>) -> Self {
        Self {
            search,
            index_name: index_name.into(),
        }
    }

    /// Returns page `page` (1-based) of `limit` hits and the total match count.
    pub async fn search(
        &self,
        query: &str,
        page: u64,
        limit: u64,
    ) -> Result<Paginated<News>, ServiceError> {
        self.run(query, page, limit).await.map_err(log_and_fail(
            "Error during Elasticsearch search",
            ServiceError::Search,
        ))
    }

    async fn run(&self, query: &str, page: u64, limit: u64) -> Result<Paginated<News>> {
        let request = SearchRequest::paged(query, page, limit);
        let response = self.search.search(&self.index_name, &request).await?;

        let total = response.total.value();
        let data: Vec<News> = response.hits.into_iter().map(News::from).collect();

        tracing::info!(
            "Search completed: found {} results for query \"{}\"",
            total,
            query
        );

        Ok(Paginated { data, total })
    }
}
