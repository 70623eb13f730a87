//! HTTP query parameters and response envelopes.

use crate::news::types::News;
use serde::{Deserialize, Serialize};

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedParams {
    pub max_records: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub search: Option<String>,
}

/// Listing response: the page, its total, and how long the store took.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: Vec<News>,
    pub total: u64,
    pub latency: String,
}
