//! Secondary Index Module
//!
//! Equality indexes over chosen record fields, maintained incrementally on every write.
//!
//! ## Core Concepts
//! - **Declaration**: Indexes are declared per `(cache, field)` when the cache is created.
//!   Declaring the same pair twice fails with `DuplicateIndex`.
//! - **Maintenance**: Each put removes the replaced record's values and adds the new ones;
//!   each delete removes them. Unchanged values are not touched.
//! - **Lookup**: `value -> {keys}` in insertion order. Unindexed fields are not an error;
//!   the store answers those with a scan.

pub mod equality;
pub mod manager;

pub use equality::EqualityIndex;
pub use manager::IndexManager;

#[cfg(test)]
mod tests;
