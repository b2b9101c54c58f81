use crate::record::{Entity, Record, RecordKind};
use crate::storage::{CacheMode, NodeId};
use serde::{Deserialize, Serialize};

/// Declaration of one cache: its name, record kind, placement metadata and indexed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub name: String,
    pub kind: RecordKind,
    pub mode: CacheMode,
    /// Backup copies per partition. Only meaningful for `Partitioned` caches.
    pub backups: u32,
    pub indexes: Vec<String>,
}

impl CacheConfig {
    pub fn new(name: &str, kind: RecordKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            mode: CacheMode::Partitioned,
            backups: 0,
            indexes: Vec::new(),
        }
    }

    pub fn for_entity<E: Entity>(name: &str) -> Self {
        Self::new(name, E::kind())
    }

    pub fn mode(mut self, mode: CacheMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn backups(mut self, backups: u32) -> Self {
        self.backups = backups;
        self
    }

    pub fn index(mut self, field: &str) -> Self {
        self.indexes.push(field.to_string());
        self
    }
}

/// Metadata reported for a registered cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheInfo {
    pub name: String,
    pub kind: String,
    pub mode: CacheMode,
    pub backups: u32,
    pub size: usize,
    pub indexes: Vec<String>,
    pub partitions: usize,
}

/// Contents of one cache as written by a caller-triggered snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub info: CacheInfo,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub node_id: NodeId,
    pub caches: Vec<CacheSnapshot>,
}
