//! Record Storage Module
//!
//! Implements the in-memory table behind every cache.
//!
//! ## Core Concepts
//! - **Rows**: `RecordStore` maps primary keys to records of one declared kind. Writes replace.
//! - **Atomicity**: Rows and the cache's indexes share one lock; a put or delete is applied to
//!   both before it returns.
//! - **Placement**: `PartitionManager` reports which partition a key hashes to and which nodes
//!   would own it for a given cache mode. It is metadata only.
//! - **Typed access**: `TypedCache<E>` wraps a store with `Entity` conversions.

pub mod memory;
pub mod partitioner;
pub mod typed;

pub use memory::{RecordStore, Scan};
pub use partitioner::{CacheMode, NodeId, PartitionManager};
pub use typed::TypedCache;
