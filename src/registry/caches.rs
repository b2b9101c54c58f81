//! Cache Registry
//!
//! Maps cache names to their `RecordStore`s. Caches are created once (get-or-create)
//! and live as long as the registry. Replication mode and backup count are kept as
//! metadata for placement reporting; they do not change how data is stored.

use super::types::*;
use crate::error::{GridError, GridResult};
use crate::record::{Entity, Value};
use crate::storage::{NodeId, PartitionManager, RecordStore, TypedCache};

use anyhow::Result;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::path::Path;
use std::sync::Arc;

struct CacheEntry {
    config: CacheConfig,
    store: Arc<RecordStore>,
}

/// Named collection of caches owned by one local node.
pub struct CacheRegistry {
    node_id: NodeId,
    partitioner: Arc<PartitionManager>,
    caches: DashMap<String, CacheEntry>,
}

impl CacheRegistry {
    /// Creates a new, empty registry for a freshly identified local node.
    pub fn new() -> Arc<Self> {
        let node_id = NodeId::new();
        Arc::new(Self {
            partitioner: Arc::new(PartitionManager::new(node_id.clone())),
            node_id,
            caches: DashMap::new(),
        })
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Returns the cache named `config.name`, creating it if needed.
    ///
    /// A new cache gets every index in `config.indexes` declared before it becomes
    /// visible. An existing cache is returned as is.
    ///
    /// # Errors
    /// * `TypeMismatch` if a cache with that name exists with a different record kind.
    /// * `DuplicateIndex` / `UnknownField` if `config.indexes` is invalid.
    pub fn get_or_create(&self, config: CacheConfig) -> GridResult<Arc<RecordStore>> {
        match self.caches.entry(config.name.clone()) {
            Entry::Occupied(existing) => {
                let entry = existing.get();
                if entry.config.kind != config.kind {
                    return Err(GridError::mismatch(
                        format!("cache '{}' of kind {}", config.name, entry.config.kind.name),
                        config.kind.name.clone(),
                    ));
                }
                if entry.config.mode != config.mode || entry.config.backups != config.backups {
                    tracing::warn!(
                        "Cache {} already exists as {:?} with {} backups; keeping it",
                        config.name,
                        entry.config.mode,
                        entry.config.backups
                    );
                }
                Ok(entry.store.clone())
            }
            Entry::Vacant(slot) => {
                let store = Arc::new(RecordStore::new(
                    &config.name,
                    config.kind.clone(),
                    self.partitioner.clone(),
                ));
                for field in &config.indexes {
                    store.declare_index(field)?;
                }

                tracing::info!(
                    "Created cache {} ({}, {:?}, backups={}, indexes={:?})",
                    config.name,
                    config.kind.name,
                    config.mode,
                    config.backups,
                    config.indexes
                );
                slot.insert(CacheEntry {
                    config,
                    store: store.clone(),
                });
                Ok(store)
            }
        }
    }

    /// Typed variant of [`get_or_create`](Self::get_or_create). `config.kind` is
    /// replaced by `E`'s kind.
    pub fn get_or_create_typed<E: Entity>(&self, config: CacheConfig) -> GridResult<TypedCache<E>> {
        let config = CacheConfig {
            kind: E::kind(),
            ..config
        };
        TypedCache::new(self.get_or_create(config)?)
    }

    pub fn cache(&self, name: &str) -> GridResult<Arc<RecordStore>> {
        self.caches
            .get(name)
            .map(|entry| entry.store.clone())
            .ok_or_else(|| GridError::UnknownCache(name.to_string()))
    }

    pub fn typed<E: Entity>(&self, name: &str) -> GridResult<TypedCache<E>> {
        TypedCache::new(self.cache(name)?)
    }

    pub fn has_cache(&self, name: &str) -> bool {
        self.caches.contains_key(name)
    }

    pub fn info(&self, name: &str) -> GridResult<CacheInfo> {
        self.caches
            .get(name)
            .map(|entry| describe(&entry))
            .ok_or_else(|| GridError::UnknownCache(name.to_string()))
    }

    /// Metadata of every cache, sorted by name.
    pub fn list(&self) -> Vec<CacheInfo> {
        let mut infos: Vec<CacheInfo> = self.caches.iter().map(|entry| describe(&entry)).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Nodes that would own `key` in cache `name`, primary first.
    pub fn owners(&self, name: &str, key: &Value) -> GridResult<Vec<NodeId>> {
        let entry = self
            .caches
            .get(name)
            .ok_or_else(|| GridError::UnknownCache(name.to_string()))?;
        let partition = self.partitioner.get_partition(key);
        Ok(self
            .partitioner
            .get_owners(partition, entry.config.mode, entry.config.backups))
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        let mut caches: Vec<CacheSnapshot> = self
            .caches
            .iter()
            .map(|entry| CacheSnapshot {
                info: describe(&entry),
                records: entry.store.scan().map(|(_, record)| record).collect(),
            })
            .collect();
        caches.sort_by(|a, b| a.info.name.cmp(&b.info.name));

        RegistrySnapshot {
            node_id: self.node_id.clone(),
            caches,
        }
    }

    /// Writes [`snapshot`](Self::snapshot) to `path` as pretty-printed JSON.
    pub fn write_snapshot(&self, path: &Path) -> Result<()> {
        let snapshot = self.snapshot();
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)?;
        tracing::info!(
            "Wrote snapshot of {} caches to {}",
            snapshot.caches.len(),
            path.display()
        );
        Ok(())
    }

    pub fn cache_count(&self) -> usize {
        self.caches.len()
    }
}

fn describe(entry: &CacheEntry) -> CacheInfo {
    CacheInfo {
        name: entry.config.name.clone(),
        kind: entry.config.kind.name.clone(),
        mode: entry.config.mode,
        backups: entry.config.backups,
        size: entry.store.len(),
        indexes: entry.store.indexed_fields(),
        partitions: entry.store.local_partition_count(),
    }
}
