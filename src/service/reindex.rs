//! Bulk re-indexing passes.
//!
//! Both reindexers walk the primary store in fixed windows bounded by a count
//! taken once up front. Each window's write is awaited before the next read.
//! Records inserted during a run are not covered; deletes can shorten the
//! last window. A failure stops the run without undoing earlier windows.

use super::types::ReindexReport;
use crate::error::{ServiceError, log_and_fail};
use crate::news::types::NewsField;
use crate::search::gateway::{IndexAction, SearchIndex};
use crate::storage::gateway::{NewsFilter, RecordStore, UpsertOp};

use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;

/// Rewrites every record in place with missing fields backfilled.
pub struct StoreReindexer {
    store: Arc<dyn RecordStore>,
}

impl StoreReindexer {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn re_index(&self, batch_size: usize) -> Result<ReindexReport, ServiceError> {
        self.run(batch_size as u64)
            .await
            .map_err(log_and_fail("Error during reindexing", ServiceError::Reindex))
    }

    async fn run(&self, batch_size: u64) -> Result<ReindexReport> {
        let batch_size = batch_size.max(1);
        let total = self.store.count(&NewsFilter::All).await?;
        tracing::info!("Total records to reindex: {}", total);

        let mut report = ReindexReport {
            total,
            ..ReindexReport::default()
        };

        let mut skip = 0;
        while skip < total {
            let page = self
                .store
                .page(&NewsFilter::All, Some(&NewsField::ALL[..]), skip, batch_size)
                .await
                .with_context(|| format!("Failed to read window at offset {}", skip))?;
            report.batches += 1;

            let now = Utc::now();
            let bulk_ops: Vec<UpsertOp> = page
                .into_iter()
                .map(|news| UpsertOp::by_id(news.id, news.fields.backfilled(now)))
                .collect();

            if !bulk_ops.is_empty() {
                report.processed += bulk_ops.len() as u64;
                self.store
                    .bulk_upsert(bulk_ops)
                    .await
                    .with_context(|| format!("Failed to write window at offset {}", skip))?;
            }

            tracing::info!(
                "Reindexed {} of {} records",
                (skip + batch_size).min(total),
                total
            );
            skip += batch_size;
        }

        tracing::info!("Reindexing completed successfully");
        Ok(report)
    }
}

/// Mirrors every record into the search index under its store id.
pub struct SearchReindexer {
    store: Arc<dyn RecordStore>,
    search: Arc<dyn SearchIndex>,
    index_name: String,
}

impl SearchReindexer {
    pub fn new(
        store: Arc<dyn RecordStore>,
        search: Arc<dyn SearchIndex>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            search,
            index_name: index_name.into(),
        }
    }

    /// Fails on the first window whose bulk response reports any item error.
    /// Documents indexed by that window and earlier ones remain in the index.
    pub async fn re_index_to_search(
        &self,
        batch_size: usize,
    ) -> Result<ReindexReport, ServiceError> {
        self.run(batch_size as u64).await.map_err(log_and_fail(
            "Error during reindexing to Elasticsearch",
            ServiceError::ReindexToSearch,
        ))
    }

    async fn run(&self, batch_size: u64) -> Result<ReindexReport> {
        let batch_size = batch_size.max(1);
        let total = self.store.count(&NewsFilter::All).await?;
        tracing::info!("Total records to reindex to Elasticsearch: {}", total);

        let mut report = ReindexReport {
            total,
            ..ReindexReport::default()
        };

        let mut skip = 0;
        while skip < total {
            let page = self
                .store
                .page(&NewsFilter::All, None, skip, batch_size)
                .await
                .with_context(|| format!("Failed to read window at offset {}", skip))?;
            report.batches += 1;

            let actions: Vec<IndexAction> = page
                .into_iter()
                .map(|news| IndexAction {
                    id: news.id,
                    document: news.fields,
                })
                .collect();

            if !actions.is_empty() {
                let count = actions.len() as u64;
                let outcome = self
                    .search
                    .bulk_index(&self.index_name, actions, true)
                    .await?;

                if outcome.has_errors() {
                    for item in outcome.failed() {
                        tracing::error!(
                            "Failed to index document {} (status {}): {}",
                            item.id,
                            item.status,
                            item.error.as_deref().unwrap_or("unknown error")
                        );
                    }
                    anyhow::bail!("Errors occurred during bulk indexing at offset {}", skip);
                }

                report.processed += count;
                tracing::info!(
                    "Reindexed {} of {} records to Elasticsearch",
                    (skip + batch_size).min(total),
                    total
                );
            }
            skip += batch_size;
        }

        tracing::info!("Reindexing to Elasticsearch completed successfully");
        Ok(report)
    }
}
