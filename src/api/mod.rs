//! HTTP API Module
//!
//! Thin axum layer over `NewsService`: parses query parameters, calls one
//! operation, and serializes the result or the operation's fixed failure.
//!
//! ## Routes
//! - `GET /news`: paginated listing with optional store text filter.
//! - `GET /news/search`: relevance search against the search index.
//! - `GET /news/run-seed`: seed synthetic records.
//! - `GET /news/re-index`: backfill pass over the primary store.
//! - `GET /news/re-index-elasticsearch`: mirror the store into the search index.
//! - `GET /news/clear-data`: delete every record.

pub mod handlers;
pub mod types;


use crate::service::NewsService;
use axum::routing::get;
use axum::{Extension, Router};
use handlers::*;
use std::sync::Arc;

pub fn router(service: Arc<NewsService>, seed_default: u64) -> Router {
    Router::new()
        .route("/news", get(handle_get_news))
        .route("/news/search", get(handle_search))
        .route("/news/run-seed", get(handle_run_seed))
        .route("/news/re-index", get(handle_re_index))
        .route("/news/re-index-elasticsearch", get(handle_re_index_search))
        .route("/news/clear-data", get(handle_clear_data))
        .layer(Extension(service))
        .layer(Extension(SeedDefault(seed_default)))
}
