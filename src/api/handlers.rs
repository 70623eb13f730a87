use super::types::{ListParams, ListResponse, SearchParams, SeedParams};
use crate::error::ServiceError;
use crate::news::types::{News, Paginated};
use crate::service::NewsService;
use crate::service::types::{ClearReport, ReindexReport, SeedReport};

use axum::extract::{Extension, Query};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;

/// Seed size used when `maxRecords` is not given.
#[derive(Debug, Clone, Copy)]
pub struct SeedDefault(pub u64);

pub async fn handle_clear_data(
    Extension(service): Extension<Arc<NewsService>>,
) -> Result<Json<ClearReport>, ServiceError> {
    service.clear_data().await.map(Json)
}

pub async fn handle_re_index(
    Extension(service): Extension<Arc<NewsService>>,
) -> Result<Json<ReindexReport>, ServiceError> {
    service.re_index().await.map(Json)
}

pub async fn handle_re_index_search(
    Extension(service): Extension<Arc<NewsService>>,
) -> Result<Json<ReindexReport>, ServiceError> {
    service.re_index_to_search().await.map(Json)
}

pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(service): Extension<Arc<NewsService>>,
) -> Result<Json<Paginated<News>>, ServiceError> {
    service
        .search(&params.q, params.page, params.limit)
        .await
        .map(Json)
}

pub async fn handle_run_seed(
    Query(params): Query<SeedParams>,
    Extension(service): Extension<Arc<NewsService>>,
    Extension(SeedDefault(default)): Extension<SeedDefault>,
) -> Result<Json<SeedReport>, ServiceError> {
    service
        .run_seed(params.max_records.unwrap_or(default))
        .await
        .map(Json)
}

pub async fn handle_get_news(
    Query(params): Query<ListParams>,
    Extension(service): Extension<Arc<NewsService>>,
) -> Result<Json<ListResponse>, ServiceError> {
    let started = Instant::now();
    let page = service
        .get_news(params.page, params.limit, params.search.as_deref())
        .await?;

    Ok(Json(ListResponse {
        data: page.data,
        total: page.total,
        latency: format!("{}ms", started.elapsed().as_millis()),
    }))
}
