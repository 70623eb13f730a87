use super::gateway::{
    BulkIndexOutcome, BulkItemOutcome, IndexAction, SearchHit, SearchHits, SearchIndex,
    SearchRequest, TotalHits,
};
use super::tokenizer::{tokenize_query, tokenize_text};
use crate::news::types::{NewsField, NewsFields};

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

struct IndexedDoc {
    seq: u64,
    document: NewsFields,
}

/// In-process search index used when no Elasticsearch URL is configured.
///
/// Documents are scored by how many query terms they contain across the
/// requested fields; ties keep indexing order.
pub struct MemorySearchIndex {
    indices: DashMap<String, DashMap<String, IndexedDoc>>,
    next_seq: AtomicU64,
}

impl MemorySearchIndex {
    pub fn new() -> Self {
        Self {
            indices: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn document(&self, index: &str, id: &str) -> Option<NewsFields> {
        self.indices
            .get(index)
            .and_then(|docs| docs.get(id).map(|doc| doc.document.clone()))
    }

    pub fn doc_count(&self, index: &str) -> usize {
        self.indices.get(index).map(|docs| docs.len()).unwrap_or(0)
    }
}

impl Default for MemorySearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn field_by_name(name: &str) -> Option<NewsField> {
    NewsField::ALL.into_iter().find(|f| f.as_str() == name)
}

fn score(document: &NewsFields, fields: &[NewsField], terms: &[String]) -> usize {
    let tokens: std::collections::HashSet<String> = fields
        .iter()
        .filter_map(|field| document.text(*field))
        .flat_map(tokenize_text)
        .collect();

    terms.iter().filter(|term| tokens.contains(*term)).count()
}

#[async_trait]
impl SearchIndex for MemorySearchIndex {
    async fn bulk_index(
        &self,
        index: &str,
        actions: Vec<IndexAction>,
        _refresh: bool,
    ) -> Result<BulkIndexOutcome> {
        let docs = self.indices.entry(index.to_string()).or_default();
        let mut items = Vec::with_capacity(actions.len());

        for action in actions {
            let status = match docs.get_mut(&action.id) {
                Some(mut existing) => {
                    existing.document = action.document;
                    200
                }
                None => {
                    let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                    docs.insert(
                        action.id.clone(),
                        IndexedDoc {
                            seq,
                            document: action.document,
                        },
                    );
                    201
                }
            };
            items.push(BulkItemOutcome {
                id: action.id,
                status,
                error: None,
            });
        }

        Ok(BulkIndexOutcome {
            errors: false,
            items,
        })
    }

    async fn search(&self, index: &str, request: &SearchRequest) -> Result<SearchHits> {
        let terms = tokenize_query(&request.query);
        let fields: Vec<NewsField> = request
            .fields
            .iter()
            .filter_map(|name| field_by_name(name))
            .collect();

        let mut scored: Vec<(usize, u64, SearchHit)> = match self.indices.get(index) {
            Some(docs) => docs
                .iter()
                .filter_map(|entry| {
                    let doc = entry.value();
                    let score = score(&doc.document, &fields, &terms);
                    (score > 0).then(|| {
                        (
                            score,
                            doc.seq,
                            SearchHit {
                                id: entry.key().clone(),
                                source: doc.document.clone(),
                            },
                        )
                    })
                })
                .collect(),
            None => Vec::new(),
        };

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        let total = scored.len() as u64;

        let hits = scored
            .into_iter()
            .skip(usize::try_from(request.from)?)
            .take(usize::try_from(request.size)?)
            .map(|(_, _, hit)| hit)
            .collect();

        Ok(SearchHits {
            hits,
            total: TotalHits::Object {
                value: total,
                relation: Some("eq".to_string()),
            },
        })
    }
}
