//! Store-side text predicate.
//!
//! Mirrors a text index declared over title, content, author, url,
//! description and sourceName: a record matches when any query term appears
//! among the tokens of those fields.

use crate::news::types::{NewsField, NewsFields};
use crate::search::tokenizer::{tokenize_query, tokenize_text};

pub const TEXT_INDEX_FIELDS: [NewsField; 6] = [
    NewsField::Title,
    NewsField::Content,
    NewsField::Author,
    NewsField::Url,
    NewsField::Description,
    NewsField::SourceName,
];

pub fn matches_text(fields: &NewsFields, search: &str) -> bool {
    let terms = tokenize_query(search);
    if terms.is_empty() {
        return false;
    }

    let indexed: std::collections::HashSet<String> = TEXT_INDEX_FIELDS
        .iter()
        .filter_map(|field| fields.text(*field))
        .flat_map(tokenize_text)
        .collect();

    terms.iter().any(|term| indexed.contains(term))
}
