use crate::record::Value;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub const DEFAULT_PARTITIONS: u32 = 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// How a cache is conceptually spread over the nodes of a cluster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CacheMode {
    /// Every node holds a full copy.
    Replicated,
    /// Keys are sharded; each partition has one primary and `backups` backup owners.
    Partitioned,
}

/// Logical placement of keys onto partitions and partitions onto nodes.
///
/// Nothing is moved between nodes; the placement is reported so callers can see
/// where a key would live. The node list normally holds only the local node.
pub struct PartitionManager {
    pub(crate) num_partitions: u32,
    nodes: Vec<NodeId>,
}

impl PartitionManager {
    pub fn new(local: NodeId) -> Self {
        Self::with_nodes(vec![local], DEFAULT_PARTITIONS)
    }

    pub fn with_nodes(mut nodes: Vec<NodeId>, num_partitions: u32) -> Self {
        nodes.sort();
        nodes.dedup();
        Self {
            num_partitions: num_partitions.max(1),
            nodes,
        }
    }

    pub fn num_partitions(&self) -> u32 {
        self.num_partitions
    }

    pub fn get_partition(&self, key: &Value) -> u32 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let hash = hasher.finish() as u32;
        hash % self.num_partitions
    }

    /// Owners of `partition`, primary first.
    ///
    /// Replicated caches are owned by every node. Partitioned caches get one primary
    /// plus up to `backups` following nodes, capped by the node count.
    pub fn get_owners(&self, partition: u32, mode: CacheMode, backups: u32) -> Vec<NodeId> {
        if self.nodes.is_empty() {
            return vec![];
        }
        match mode {
            CacheMode::Replicated => self.nodes.clone(),
            CacheMode::Partitioned => {
                let copies = (backups as usize + 1).min(self.nodes.len());
                let primary_idx = (partition as usize) % self.nodes.len();
                (0..copies)
                    .map(|offset| self.nodes[(primary_idx + offset) % self.nodes.len()].clone())
                    .collect()
            }
        }
    }
}
