//! News Index Service Library
//!
//! A news-article collection kept in a primary document store and mirrored
//! into a full-text search index. The binary (`main.rs`) wires these modules
//! behind an HTTP router.
//!
//! ## Architecture Modules
//! - **`news`**: The article record, validation, default backfill and synthetic generation.
//! - **`storage`**: The primary store gateway (count, paginated read, bulk upsert, delete)
//!   with MongoDB and in-memory backends sharing one text predicate.
//! - **`search`**: The search index gateway, an Elasticsearch REST client and an
//!   in-memory index.
//! - **`service`**: Seeding, store-to-store and store-to-search re-indexing, search, listing.
//! - **`api`**: Axum handlers exposing the six operations.
//! - **`config`** / **`error`**: Environment configuration and operation-level failures.

pub mod api;
pub mod config;
pub mod error;
pub mod news;
pub mod search;
pub mod service;
pub mod storage;
