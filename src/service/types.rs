use serde::Serialize;

/// Default window size for seeding and re-indexing.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default number of records generated by a seed run.
pub const DEFAULT_SEED_RECORDS: u64 = 2000;

/// Default search index name.
pub const DEFAULT_INDEX: &str = "news";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    /// Generation attempts, not distinct persisted records.
    pub generated: u64,
    /// Bulk writes issued.
    pub batches: u64,
    /// Records inserted (as opposed to overwritten by url).
    pub upserted: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReindexReport {
    /// Collection size read once before the first window.
    pub total: u64,
    /// Windows read.
    pub batches: u64,
    /// Records written back.
    pub processed: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearReport {
    pub deleted: u64,
}
