//! Record Store Gateway
//!
//! The contract every primary-store backend implements. Services only ever
//! talk to the store through this trait.

use crate::news::types::{News, NewsField, NewsFields};
use anyhow::Result;
use async_trait::async_trait;

/// Which records a count or page read applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsFilter {
    All,
    /// Store-native text predicate over title, content, author, url,
    /// description and sourceName.
    Text(String),
}

impl NewsFilter {
    /// `Text` for a non-empty search string, `All` otherwise.
    pub fn from_search(search: Option<&str>) -> Self {
        match search.map(str::trim) {
            Some(s) if !s.is_empty() => NewsFilter::Text(s.to_string()),
            _ => NewsFilter::All,
        }
    }
}

/// Filter key of a single upsert operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertKey {
    Id(String),
    Url(String),
}

/// One insert-or-update inside a bulk write.
///
/// `fields` is applied with `$set` semantics: present values overwrite,
/// absent values leave the stored field untouched.
#[derive(Debug, Clone)]
pub struct UpsertOp {
    pub key: UpsertKey,
    pub fields: NewsFields,
    pub upsert: bool,
}

impl UpsertOp {
    pub fn by_url(url: String, fields: NewsFields) -> Self {
        Self {
            key: UpsertKey::Url(url),
            fields,
            upsert: true,
        }
    }

    pub fn by_id(id: String, fields: NewsFields) -> Self {
        Self {
            key: UpsertKey::Id(id),
            fields,
            upsert: false,
        }
    }
}

/// Result counters of a bulk write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkWriteSummary {
    pub matched: u64,
    pub modified: u64,
    pub upserted: u64,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn count(&self, filter: &NewsFilter) -> Result<u64>;

    /// Reads up to `limit` records starting at `skip`, in store order.
    ///
    /// With a projection, only `id` and the listed fields are populated.
    /// Repeated calls with increasing `skip` partition a static collection;
    /// a collection mutated mid-scan may yield overlaps or gaps.
    async fn page(
        &self,
        filter: &NewsFilter,
        projection: Option<&[NewsField]>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<News>>;

    /// Executes the operations in order. The first failure aborts the rest;
    /// operations already applied stay applied.
    async fn bulk_upsert(&self, ops: Vec<UpsertOp>) -> Result<BulkWriteSummary>;

    /// Removes every record and returns how many were deleted.
    async fn delete_all(&self) -> Result<u64>;
}
