use super::types::SeedReport;
use crate::error::{ServiceError, log_and_fail};
use crate::news::faker::{FakeNewsGenerator, RecordGenerator};
use crate::news::types::NewsFields;
use crate::storage::gateway::{RecordStore, UpsertOp};

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};

/// Fills the primary store with synthetic articles, deduplicated by url.
pub struct Seeder {
    store: Arc<dyn RecordStore>,
    generator: Mutex<Box<dyn RecordGenerator>>,
}

impl Seeder {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_generator(store, Box::new(FakeNewsGenerator::new()))
    }

    pub fn with_generator(
        store: Arc<dyn RecordStore>,
        generator: Box<dyn RecordGenerator>,
    ) -> Self {
        Self {
            store,
            generator: Mutex::new(generator),
        }
    }

    /// Generates `max_records` articles and upserts them by url in batches.
    ///
    /// Issues exactly `ceil(max_records / batch_size)` bulk writes. A failed
    /// write aborts the run; earlier batches stay persisted.
    pub async fn run_seed(
        &self,
        max_records: u64,
        batch_size: usize,
    ) -> Result<SeedReport, ServiceError> {
        self.seed(max_records, batch_size)
            .await
            .map_err(log_and_fail("Error during seeding", ServiceError::Seed))
    }

    async fn seed(&self, max_records: u64, batch_size: usize) -> Result<SeedReport> {
        let batch_size = batch_size.max(1);
        tracing::info!("Seeding {} fake news records...", max_records);

        let mut bulk_ops: Vec<UpsertOp> = Vec::with_capacity(batch_size);
        let mut report = SeedReport::default();

        while report.generated < max_records {
            let record = self.next_record().validated()?;
            let url = record.url.clone().unwrap_or_default();
            bulk_ops.push(UpsertOp::by_url(url, record));
            report.generated += 1;

            if bulk_ops.len() == batch_size {
                self.flush(&mut bulk_ops, &mut report).await?;
            }
        }

        if !bulk_ops.is_empty() {
            self.flush(&mut bulk_ops, &mut report).await?;
        }

        tracing::info!(
            "Seeding completed successfully. Inserted/Updated {} records.",
            report.generated
        );
        Ok(report)
    }

    fn next_record(&self) -> NewsFields {
        let mut generator = self
            .generator
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        generator.generate()
    }

    async fn flush(&self, bulk_ops: &mut Vec<UpsertOp>, report: &mut SeedReport) -> Result<()> {
        let summary = self
            .store
            .bulk_upsert(std::mem::take(bulk_ops))
            .await
            .context("Bulk write failed while seeding")?;

        report.batches += 1;
        report.upserted += summary.upserted;
        tracing::info!("Inserted/Updated {} records...", report.generated);
        Ok(())
    }
}
