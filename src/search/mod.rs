//! Search Index Module
//!
//! The full-text search side of the system: a denormalized, eventually
//! consistent copy of the primary store that answers relevance queries.
//!
//! ## Submodules
//! - **`gateway`**: The `SearchIndex` trait, bulk outcomes and hit-count normalization.
//! - **`elastic`**: Elasticsearch REST client (NDJSON bulk, `multi_match` search).
//! - **`memory`**: In-process index with term-count scoring, used without Elasticsearch.
//! - **`tokenizer`**: Text normalization shared with the store's text predicate.

pub mod elastic;
pub mod gateway;
pub mod memory;
pub mod tokenizer;

#[cfg(test)]
mod tests;
