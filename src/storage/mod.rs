//! Primary Store Module
//!
//! The document store that owns the news collection.
//!
//! ## Core Concepts
//! - **Gateway**: `RecordStore` abstracts count, paginated read, bulk upsert and delete-all.
//! - **Filters**: `NewsFilter` selects everything or applies the store's text predicate.
//! - **Upserts**: Bulk writes are ordered `$set` operations keyed by id or url.
//! - **Backends**: `MongoRecordStore` persists to a MongoDB collection with a text index;
//!   `MemoryRecordStore` keeps records in a `DashMap` with a stable insertion order.

pub mod gateway;
pub mod memory;
pub mod mongo;
pub mod text;
