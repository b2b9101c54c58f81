//! Cache Registry Module
//!
//! Namespace of named caches with per-cache placement metadata.
//!
//! ## Core Concepts
//! - **Get-or-create**: Declaring a cache that already exists returns the same store,
//!   so every handle obtained by name sees the same data.
//! - **Indexed fields**: Declared in `CacheConfig` and registered before the cache is
//!   published.
//! - **Cache mode**: `REPLICATED` or `PARTITIONED` plus a backup count. Stored and reported
//!   (`owners`, `list`), not acted on.
//! - **Snapshots**: A caller may export every cache as JSON; nothing is persisted otherwise.

pub mod caches;
pub mod types;

pub use caches::CacheRegistry;
pub use types::{CacheConfig, CacheInfo, CacheSnapshot, RegistrySnapshot};

#[cfg(test)]
mod tests;
