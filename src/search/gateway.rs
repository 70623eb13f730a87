//! Search Index Gateway
//!
//! The contract for the full-text search backend: bulk index-or-overwrite by
//! id, and multi-field relevance queries with pagination.

use crate::news::types::{News, NewsFields};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fields the relevance query runs against.
pub const SEARCH_FIELDS: [&str; 4] = ["title", "content", "author", "description"];

/// Index-or-overwrite of one document under a fixed id.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexAction {
    pub id: String,
    pub document: NewsFields,
}

/// Per-item result of a bulk index call.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemOutcome {
    pub id: String,
    pub status: u16,
    pub error: Option<String>,
}

/// Result of a bulk index call. `errors` is the backend's own summary flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkIndexOutcome {
    pub errors: bool,
    pub items: Vec<BulkItemOutcome>,
}

impl BulkIndexOutcome {
    pub fn has_errors(&self) -> bool {
        self.errors || self.items.iter().any(|item| item.error.is_some())
    }

    pub fn failed(&self) -> impl Iterator<Item = &BulkItemOutcome> {
        self.items.iter().filter(|item| item.error.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub fields: Vec<String>,
    pub from: u64,
    pub size: u64,
}

impl SearchRequest {
    /// Relevance query over [`SEARCH_FIELDS`] for a 1-based page.
    ///
    /// Page 0 is treated as page 1. Offsets past `u64::MAX` clamp to it.
    pub fn paged(query: &str, page: u64, limit: u64) -> Self {
        Self {
            query: query.to_string(),
            fields: SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
            from: page.saturating_sub(1).saturating_mul(limit),
            size: limit,
        }
    }
}

/// Total hit count as a backend may report it: a bare number or a
/// `{ "value": n, "relation": "eq" | "gte" }` object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Object {
        value: u64,
        #[serde(default)]
        relation: Option<String>,
    },
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(n) => *n,
            TotalHits::Object { value, .. } => *value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub source: NewsFields,
}

impl From<SearchHit> for News {
    fn from(hit: SearchHit) -> Self {
        News {
            id: hit.id,
            fields: hit.source,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHits {
    pub hits: Vec<SearchHit>,
    pub total: TotalHits,
}

#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Indexes every action, overwriting documents that share an id.
    ///
    /// Item failures are reported in the outcome, not as an `Err`; `Err` means
    /// the request as a whole failed.
    async fn bulk_index(
        &self,
        index: &str,
        actions: Vec<IndexAction>,
        refresh: bool,
    ) -> Result<BulkIndexOutcome>;

    async fn search(&self, index: &str, request: &SearchRequest) -> Result<SearchHits>;
}
