//! News Record Module
//!
//! The article data model shared by every other subsystem.
//!
//! ## Submodules
//! - **`types`**: `News`, the nine-field `NewsFields` projection, validated
//!   construction and default backfill.
//! - **`faker`**: Synthetic article generation for seeding.

pub mod faker;
pub mod types;

#[cfg(test)]
mod tests;
