use super::gateway::{BulkWriteSummary, NewsFilter, RecordStore, UpsertKey, UpsertOp};
use super::text::matches_text;
use crate::news::types::{News, NewsField, NewsFields};

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredNews {
    seq: u64,
    fields: NewsFields,
}

/// In-memory primary store.
///
/// Records live in a `DashMap` keyed by id; an insertion sequence number
/// gives pages a stable order. There is no unique index on `url`, so two
/// concurrent upserts of the same url can both insert.
pub struct MemoryRecordStore {
    records: DashMap<String, StoredNews>,
    next_seq: AtomicU64,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Inserts a record as-is under a fresh id, bypassing validation.
    ///
    /// Stands in for ingestion paths that may leave fields empty.
    pub fn insert(&self, fields: NewsFields) -> String {
        let id = Uuid::new_v4().to_string();
        self.insert_with_id(id.clone(), fields);
        id
    }

    pub fn insert_with_id(&self, id: String, fields: NewsFields) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.records.insert(id, StoredNews { seq, fields });
    }

    pub fn get(&self, id: &str) -> Option<News> {
        self.records.get(id).map(|entry| News {
            id: id.to_string(),
            fields: entry.fields.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matching(&self, filter: &NewsFilter) -> Vec<(u64, News)> {
        self.records
            .iter()
            .filter(|entry| match filter {
                NewsFilter::All => true,
                NewsFilter::Text(search) => matches_text(&entry.value().fields, search),
            })
            .map(|entry| {
                (
                    entry.value().seq,
                    News {
                        id: entry.key().clone(),
                        fields: entry.value().fields.clone(),
                    },
                )
            })
            .collect()
    }

    fn find_id(&self, key: &UpsertKey) -> Option<String> {
        match key {
            UpsertKey::Id(id) => self.records.contains_key(id).then(|| id.clone()),
            UpsertKey::Url(url) => self
                .records
                .iter()
                .filter(|entry| entry.value().fields.url.as_deref() == Some(url.as_str()))
                .min_by_key(|entry| entry.value().seq)
                .map(|entry| entry.key().clone()),
        }
    }

    fn apply(&self, op: UpsertOp, summary: &mut BulkWriteSummary) {
        match self.find_id(&op.key) {
            Some(id) => {
                if let Some(mut entry) = self.records.get_mut(&id) {
                    summary.matched += 1;
                    let before = entry.fields.clone();
                    entry.fields.apply_set(&op.fields);
                    if entry.fields != before {
                        summary.modified += 1;
                    }
                }
            }
            None if op.upsert => {
                let mut fields = NewsFields::default();
                if let UpsertKey::Url(url) = &op.key {
                    fields.url = Some(url.clone());
                }
                fields.apply_set(&op.fields);
                let id = match op.key {
                    UpsertKey::Id(id) => id,
                    UpsertKey::Url(_) => Uuid::new_v4().to_string(),
                };
                self.insert_with_id(id, fields);
                summary.upserted += 1;
            }
            None => {
                tracing::debug!("Upsert filter {:?} matched nothing", op.key);
            }
        }
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn count(&self, filter: &NewsFilter) -> Result<u64> {
        let count = match filter {
            NewsFilter::All => self.records.len(),
            NewsFilter::Text(_) => self.matching(filter).len(),
        };
        Ok(count as u64)
    }

    async fn page(
        &self,
        filter: &NewsFilter,
        projection: Option<&[NewsField]>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<News>> {
        let mut matching = self.matching(filter);
        matching.sort_by_key(|(seq, _)| *seq);

        let page = matching
            .into_iter()
            .skip(usize::try_from(skip)?)
            .take(usize::try_from(limit)?)
            .map(|(_, news)| match projection {
                Some(fields) => News {
                    id: news.id,
                    fields: news.fields.project(fields),
                },
                None => news,
            })
            .collect();

        Ok(page)
    }

    async fn bulk_upsert(&self, ops: Vec<UpsertOp>) -> Result<BulkWriteSummary> {
        let mut summary = BulkWriteSummary::default();
        for op in ops {
            self.apply(op, &mut summary);
        }
        tracing::debug!(
            "Bulk write: matched={} modified={} upserted={}",
            summary.matched,
            summary.modified,
            summary.upserted
        );
        Ok(summary)
    }

    async fn delete_all(&self) -> Result<u64> {
        let deleted = self.records.len() as u64;
        self.records.clear();
        Ok(deleted)
    }
}
