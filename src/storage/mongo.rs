//! MongoDB backend for [`RecordStore`].
//!
//! Records live in one collection with a text index over the same six fields
//! the in-memory predicate uses, so `NewsFilter::Text` maps onto `$text`.

use super::gateway::{BulkWriteSummary, NewsFilter, RecordStore, UpsertKey, UpsertOp};
use super::text::TEXT_INDEX_FIELDS;
use crate::news::types::{News, NewsField, NewsFields};

use anyhow::{Context, Result};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::{Client, Collection, IndexModel};

pub const DEFAULT_DATABASE: &str = "news-db";
pub const COLLECTION: &str = "news";

pub struct MongoRecordStore {
    collection: Collection<Document>,
}

impl MongoRecordStore {
    /// Connects and makes sure the collection's indexes exist.
    ///
    /// The database comes from the URL path, falling back to `news-db`.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::with_uri_str(url)
            .await
            .context("Failed to create MongoDB client")?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        let store = Self {
            collection: database.collection(COLLECTION),
        };
        store.ensure_indexes().await?;

        tracing::info!(
            "Connected to MongoDB database {} collection {}",
            database.name(),
            COLLECTION
        );
        Ok(store)
    }

    async fn ensure_indexes(&self) -> Result<()> {
        self.collection
            .create_index(IndexModel::builder().keys(text_index_keys()).build())
            .await
            .context("Failed to create text index")?;
        self.collection
            .create_index(IndexModel::builder().keys(doc! { "url": 1 }).build())
            .await
            .context("Failed to create url index")?;
        Ok(())
    }
}

pub(crate) fn text_index_keys() -> Document {
    TEXT_INDEX_FIELDS
        .iter()
        .map(|field| (field.as_str().to_string(), Bson::String("text".to_string())))
        .collect()
}

pub(crate) fn filter_document(filter: &NewsFilter) -> Document {
    match filter {
        NewsFilter::All => Document::new(),
        NewsFilter::Text(search) => doc! { "$text": { "$search": search.as_str() } },
    }
}

pub(crate) fn projection_document(fields: &[NewsField]) -> Document {
    fields
        .iter()
        .map(|field| (field.as_str().to_string(), Bson::Int32(1)))
        .collect()
}

/// `_id` filter for an id key. Ids that are not ObjectId hex match as strings.
pub(crate) fn key_filter(key: &UpsertKey) -> Document {
    match key {
        UpsertKey::Id(id) => match ObjectId::parse_str(id) {
            Ok(oid) => doc! { "_id": oid },
            Err(_) => doc! { "_id": id.as_str() },
        },
        UpsertKey::Url(url) => doc! { "url": url.as_str() },
    }
}

/// The `$set` operand: present fields only, `publishedAt` as a BSON date.
pub(crate) fn set_document(fields: &NewsFields) -> Result<Document> {
    let mut set = bson::to_document(fields).context("Failed to encode news fields")?;
    if let Some(published_at) = fields.published_at {
        set.insert(
            NewsField::PublishedAt.as_str(),
            bson::DateTime::from_chrono(published_at),
        );
    }
    Ok(set)
}

pub(crate) fn news_from_document(mut document: Document) -> Result<News> {
    let id = match document.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(id)) => id,
        Some(other) => other.to_string(),
        None => anyhow::bail!("Stored document has no _id"),
    };

    let published_at = NewsField::PublishedAt.as_str();
    if let Some(Bson::DateTime(date)) = document.get(published_at).cloned() {
        document.insert(published_at, date.to_chrono().to_rfc3339());
    }

    let fields: NewsFields = bson::from_document(document)
        .with_context(|| format!("Failed to decode stored news {}", id))?;
    Ok(News { id, fields })
}

#[async_trait]
impl RecordStore for MongoRecordStore {
    async fn count(&self, filter: &NewsFilter) -> Result<u64> {
        let count = self
            .collection
            .count_documents(filter_document(filter))
            .await
            .context("Failed to count news")?;
        Ok(count)
    }

    async fn page(
        &self,
        filter: &NewsFilter,
        projection: Option<&[NewsField]>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<News>> {
        // A zero limit means "no limit" to the server.
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut find = self
            .collection
            .find(filter_document(filter))
            .sort(doc! { "_id": 1 })
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX));
        if let Some(fields) = projection {
            find = find.projection(projection_document(fields));
        }

        let mut cursor = find.await.context("Failed to query news")?;
        let mut page = Vec::new();
        while cursor.advance().await.context("Failed to read news cursor")? {
            page.push(news_from_document(cursor.deserialize_current()?)?);
        }
        Ok(page)
    }

    async fn bulk_upsert(&self, ops: Vec<UpsertOp>) -> Result<BulkWriteSummary> {
        let mut summary = BulkWriteSummary::default();

        for op in ops {
            let set = set_document(&op.fields)?;
            let result = self
                .collection
                .update_one(key_filter(&op.key), doc! { "$set": set })
                .upsert(op.upsert)
                .await
                .with_context(|| format!("Failed to upsert news by {:?}", op.key))?;

            summary.matched += result.matched_count;
            summary.modified += result.modified_count;
            if result.upserted_id.is_some() {
                summary.upserted += 1;
            }
        }

        Ok(summary)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = self
            .collection
            .delete_many(Document::new())
            .await
            .context("Failed to delete news")?;
        Ok(result.deleted_count)
    }
}
