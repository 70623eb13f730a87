//! News Record Types
//!
//! The stored article shape, the nine-field projection shared by the store and
//! the search index, and the validation/backfill rules applied to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "No Title";
pub const DEFAULT_CONTENT: &str = "No Content";
pub const DEFAULT_AUTHOR: &str = "Unknown Author";
pub const DEFAULT_SOURCE_NAME: &str = "Unknown Source";

/// Failure returned by [`NewsFields::validated`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

/// One of the nine article fields. Used for store-side projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsField {
    Title,
    Content,
    Author,
    Url,
    UrlToImage,
    PublishedAt,
    Description,
    SourceId,
    SourceName,
}

impl NewsField {
    pub const ALL: [NewsField; 9] = [
        NewsField::Title,
        NewsField::Content,
        NewsField::Author,
        NewsField::Url,
        NewsField::UrlToImage,
        NewsField::PublishedAt,
        NewsField::Description,
        NewsField::SourceId,
        NewsField::SourceName,
    ];

    /// Field name as it appears in serialized documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsField::Title => "title",
            NewsField::Content => "content",
            NewsField::Author => "author",
            NewsField::Url => "url",
            NewsField::UrlToImage => "urlToImage",
            NewsField::PublishedAt => "publishedAt",
            NewsField::Description => "description",
            NewsField::SourceId => "sourceId",
            NewsField::SourceName => "sourceName",
        }
    }
}

/// The nine article fields, every one of them optional.
///
/// Records in the primary store may be incomplete (they can come from outside
/// the seeder), so nothing here is enforced at the type level. Absent values
/// are left out when serialized, so a `$set` built from a partial record only
/// touches the fields it carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_to_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

impl NewsFields {
    /// Checks the required fields and hands the record back unchanged.
    ///
    /// Required: title, content, author, url, publishedAt, sourceName.
    /// An empty string counts as missing.
    pub fn validated(self) -> Result<Self, RecordError> {
        let required = [
            (NewsField::Title, &self.title),
            (NewsField::Content, &self.content),
            (NewsField::Author, &self.author),
            (NewsField::Url, &self.url),
        ];
        for (field, value) in required {
            if is_blank(value) {
                return Err(RecordError::MissingField(field.as_str()));
            }
        }
        if self.published_at.is_none() {
            return Err(RecordError::MissingField(NewsField::PublishedAt.as_str()));
        }
        if is_blank(&self.source_name) {
            return Err(RecordError::MissingField(NewsField::SourceName.as_str()));
        }
        Ok(self)
    }

    /// Returns a copy with every missing or empty field replaced by its default.
    pub fn backfilled(&self, now: DateTime<Utc>) -> Self {
        Self {
            title: Some(or_default(&self.title, DEFAULT_TITLE)),
            content: Some(or_default(&self.content, DEFAULT_CONTENT)),
            author: Some(or_default(&self.author, DEFAULT_AUTHOR)),
            url: Some(or_default(&self.url, "")),
            url_to_image: Some(or_default(&self.url_to_image, "")),
            published_at: Some(self.published_at.unwrap_or(now)),
            description: Some(or_default(&self.description, "")),
            source_id: Some(or_default(&self.source_id, "")),
            source_name: Some(or_default(&self.source_name, DEFAULT_SOURCE_NAME)),
        }
    }

    /// `$set` semantics: every present field in `update` overwrites ours.
    pub fn apply_set(&mut self, update: &NewsFields) {
        fn set<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }

        set(&mut self.title, &update.title);
        set(&mut self.content, &update.content);
        set(&mut self.author, &update.author);
        set(&mut self.url, &update.url);
        set(&mut self.url_to_image, &update.url_to_image);
        set(&mut self.published_at, &update.published_at);
        set(&mut self.description, &update.description);
        set(&mut self.source_id, &update.source_id);
        set(&mut self.source_name, &update.source_name);
    }

    /// Keeps only the listed fields, clearing the rest.
    pub fn project(&self, fields: &[NewsField]) -> Self {
        let keep = |f: NewsField| fields.contains(&f);
        Self {
            title: self.title.clone().filter(|_| keep(NewsField::Title)),
            content: self.content.clone().filter(|_| keep(NewsField::Content)),
            author: self.author.clone().filter(|_| keep(NewsField::Author)),
            url: self.url.clone().filter(|_| keep(NewsField::Url)),
            url_to_image: self.url_to_image.clone().filter(|_| keep(NewsField::UrlToImage)),
            published_at: self.published_at.filter(|_| keep(NewsField::PublishedAt)),
            description: self.description.clone().filter(|_| keep(NewsField::Description)),
            source_id: self.source_id.clone().filter(|_| keep(NewsField::SourceId)),
            source_name: self.source_name.clone().filter(|_| keep(NewsField::SourceName)),
        }
    }

    /// Text value of a string field. `publishedAt` has no text form here.
    pub fn text(&self, field: NewsField) -> Option<&str> {
        match field {
            NewsField::Title => self.title.as_deref(),
            NewsField::Content => self.content.as_deref(),
            NewsField::Author => self.author.as_deref(),
            NewsField::Url => self.url.as_deref(),
            NewsField::UrlToImage => self.url_to_image.as_deref(),
            NewsField::PublishedAt => None,
            NewsField::Description => self.description.as_deref(),
            NewsField::SourceId => self.source_id.as_deref(),
            NewsField::SourceName => self.source_name.as_deref(),
        }
    }

    /// True when all nine fields are present (strings may still be empty).
    pub fn is_complete(&self) -> bool {
        self.title.is_some()
            && self.content.is_some()
            && self.author.is_some()
            && self.url.is_some()
            && self.url_to_image.is_some()
            && self.published_at.is_some()
            && self.description.is_some()
            && self.source_id.is_some()
            && self.source_name.is_some()
    }
}

/// A stored article: the store-assigned id plus its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub id: String,
    #[serde(flatten)]
    pub fields: NewsFields,
}

/// One page of results and the total matching under the same filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: u64,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

fn or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
