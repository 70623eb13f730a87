//! Elasticsearch HTTP client implementing [`SearchIndex`].
//!
//! Talks to the REST API directly: NDJSON `_bulk` for indexing and a
//! `multi_match` body on `{index}/_search` for queries.

use super::gateway::{
    BulkIndexOutcome, BulkItemOutcome, IndexAction, SearchHit, SearchHits, SearchIndex,
    SearchRequest, TotalHits,
};
use crate::news::types::NewsFields;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ElasticsearchIndex {
    http_client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    #[serde(default)]
    errors: bool,
    #[serde(default)]
    items: Vec<HashMap<String, BulkResponseItem>>,
}

#[derive(Debug, Deserialize)]
struct BulkResponseItem {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(default)]
    status: u16,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    total: TotalHits,
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source", default)]
    source: NewsFields,
}

impl ElasticsearchIndex {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create Elasticsearch HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

/// Renders the NDJSON body of a `_bulk` request: one action line and one
/// document line per action, newline terminated.
pub fn bulk_body(index: &str, actions: &[IndexAction]) -> Result<String> {
    let mut body = String::new();
    for action in actions {
        let header = json!({ "index": { "_index": index, "_id": action.id } });
        body.push_str(&serde_json::to_string(&header)?);
        body.push('\n');
        body.push_str(&serde_json::to_string(&action.document)?);
        body.push('\n');
    }
    Ok(body)
}

/// JSON body of a `multi_match` query with pagination.
pub fn search_body(request: &SearchRequest) -> serde_json::Value {
    json!({
        "from": request.from,
        "size": request.size,
        "query": {
            "multi_match": {
                "query": request.query,
                "fields": request.fields,
            }
        }
    })
}

fn bulk_outcome(response: BulkResponse) -> BulkIndexOutcome {
    let items = response
        .items
        .into_iter()
        .flat_map(|item| item.into_values())
        .map(|item| BulkItemOutcome {
            id: item.id.unwrap_or_default(),
            status: item.status,
            error: item.error.map(|e| match e.get("reason").and_then(|r| r.as_str()) {
                Some(reason) => reason.to_string(),
                None => e.to_string(),
            }),
        })
        .collect();

    BulkIndexOutcome {
        errors: response.errors,
        items,
    }
}

#[async_trait]
impl SearchIndex for ElasticsearchIndex {
    async fn bulk_index(
        &self,
        index: &str,
        actions: Vec<IndexAction>,
        refresh: bool,
    ) -> Result<BulkIndexOutcome> {
        let body = bulk_body(index, &actions)?;
        let url = format!("{}/_bulk?refresh={}", self.base_url, refresh);

        tracing::debug!("POST {} ({} actions)", url, actions.len());

        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await
            .context("Bulk request to Elasticsearch failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Elasticsearch bulk returned {}: {}", status, text);
        }

        let parsed: BulkResponse = response
            .json()
            .await
            .context("Invalid bulk response from Elasticsearch")?;

        Ok(bulk_outcome(parsed))
    }

    async fn search(&self, index: &str, request: &SearchRequest) -> Result<SearchHits> {
        let url = format!("{}/{}/_search", self.base_url, index);

        tracing::debug!("POST {} from={} size={}", url, request.from, request.size);

        let response = self
            .http_client
            .post(&url)
            .json(&search_body(request))
            .send()
            .await
            .context("Search request to Elasticsearch failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Elasticsearch search returned {}: {}", status, text);
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .context("Invalid search response from Elasticsearch")?;

        Ok(SearchHits {
            hits: parsed
                .hits
                .hits
                .into_iter()
                .map(|hit| SearchHit {
                    id: hit.id,
                    source: hit.source,
                })
                .collect(),
            total: parsed.hits.total,
        })
    }
}

#[cfg(test)]
pub(crate) fn parse_bulk_response(value: serde_json::Value) -> Result<BulkIndexOutcome> {
    Ok(bulk_outcome(serde_json::from_value(value)?))
}

#[cfg(test)]
pub(crate) fn parse_search_total(value: serde_json::Value) -> Result<u64> {
    let parsed: SearchResponse = serde_json::from_value(value)?;
    Ok(parsed.hits.total.value())
}
