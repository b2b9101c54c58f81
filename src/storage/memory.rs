use super::partitioner::PartitionManager;
use crate::error::{GridError, GridResult};
use crate::index::IndexManager;
use crate::record::{Record, RecordKind, Value};

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// Rows and indexes of one cache. Always mutated together under the store's write lock.
struct StoreInner {
    rows: IndexMap<Value, Record>,
    indexes: IndexManager,
}

/// A typed key/value table with equality indexes.
///
/// All operations on one store are serialized by a single `RwLock` covering both
/// rows and indexes: a reader sees either the state before a write or after it.
pub struct RecordStore {
    name: String,
    kind: RecordKind,
    partitioner: Arc<PartitionManager>,
    inner: RwLock<StoreInner>,
}

impl RecordStore {
    pub fn new(name: &str, kind: RecordKind, partitioner: Arc<PartitionManager>) -> Self {
        let indexes = IndexManager::new(name, kind.clone());
        Self {
            name: name.to_string(),
            kind,
            partitioner,
            inner: RwLock::new(StoreInner {
                rows: IndexMap::new(),
                indexes,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &RecordKind {
        &self.kind
    }

    /// Inserts or replaces the record at `key` and updates every index before returning.
    ///
    /// # Errors
    /// `TypeMismatch` if the key or record does not fit the cache's kind, or if the
    /// record's own key field disagrees with `key`. Nothing is written in that case.
    pub fn put(&self, key: Value, record: Record) -> GridResult<()> {
        self.kind.check_key(&key)?;
        self.kind.validate(&record)?;
        if record.get(&self.kind.key_field) != Some(&key) {
            return Err(GridError::mismatch(
                format!("{}.{} = {}", self.kind.name, self.kind.key_field, key),
                record
                    .get(&self.kind.key_field)
                    .map(Value::to_string)
                    .unwrap_or_default(),
            ));
        }

        let mut inner = self.inner.write();
        let StoreInner { rows, indexes } = &mut *inner;
        let old = rows.get(&key);
        if old == Some(&record) {
            tracing::debug!("PUT {}[{}]: unchanged", self.name, key);
            return Ok(());
        }
        indexes.on_write(&key, old, &record);
        tracing::debug!(
            "PUT {}[{}] in partition {}",
            self.name,
            key,
            self.partitioner.get_partition(&key)
        );
        rows.insert(key, record);
        Ok(())
    }

    pub fn get(&self, key: &Value) -> Option<Record> {
        self.inner.read().rows.get(key).cloned()
    }

    /// Removes the record at `key`, if any, together with its index entries.
    pub fn delete(&self, key: &Value) -> Option<Record> {
        let mut inner = self.inner.write();
        let removed = inner.rows.shift_remove(key)?;
        inner.indexes.on_delete(key, &removed);
        tracing::debug!("DELETE {}[{}]", self.name, key);
        Some(removed)
    }

    /// Snapshot of the current contents, in insertion order.
    pub fn scan(&self) -> Scan {
        let inner = self.inner.read();
        let entries: Vec<(Value, Record)> = inner
            .rows
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Scan {
            entries: entries.into(),
            pos: 0,
        }
    }

    /// Records for `keys`, skipping keys that are not present. Taken under one read lock.
    pub fn get_many<'a, I>(&self, keys: I) -> Vec<(Value, Record)>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let inner = self.inner.read();
        keys.into_iter()
            .filter_map(|key| inner.rows.get(key).map(|r| (key.clone(), r.clone())))
            .collect()
    }

    pub fn declare_index(&self, field: &str) -> GridResult<()> {
        let mut inner = self.inner.write();
        let StoreInner { rows, indexes } = &mut *inner;
        indexes.declare(field, rows.iter())
    }

    /// Keys whose `field` equals `value`.
    ///
    /// Uses the equality index when one is declared, the primary map for the key
    /// field, and a scan otherwise.
    ///
    /// # Errors
    /// `UnknownField` if the record kind has no such field.
    pub fn lookup(&self, field: &str, value: &Value) -> GridResult<IndexSet<Value>> {
        self.find_keys(field, value, false)
    }

    /// Like [`lookup`](Self::lookup), with optional case-insensitive text equality.
    /// Case-insensitive matches always scan, since indexes hold exact values.
    pub fn find_keys(
        &self,
        field: &str,
        value: &Value,
        ignore_case: bool,
    ) -> GridResult<IndexSet<Value>> {
        self.kind.require_field(field)?;
        let inner = self.inner.read();

        if !ignore_case {
            if let Some(keys) = inner.indexes.lookup(field, value) {
                return Ok(keys);
            }
            if field == self.kind.key_field {
                return Ok(inner
                    .rows
                    .get_key_value(value)
                    .map(|(k, _)| k.clone())
                    .into_iter()
                    .collect());
            }
        }

        tracing::debug!("No usable index on {}.{}, scanning", self.name, field);
        Ok(inner
            .rows
            .iter()
            .filter(|(_, record)| {
                record
                    .get(field)
                    .is_some_and(|v| v.matches(value, ignore_case))
            })
            .map(|(key, _)| key.clone())
            .collect())
    }

    pub fn is_indexed(&self, field: &str) -> bool {
        self.inner.read().indexes.is_indexed(field)
    }

    pub fn indexed_fields(&self) -> Vec<String> {
        self.inner.read().indexes.indexed_fields()
    }

    pub fn index_size(&self, field: &str) -> Option<usize> {
        self.inner.read().indexes.index_size(field)
    }

    /// True if every row is present in every index under its current value and no
    /// index references a key that is not stored.
    pub fn indexes_consistent(&self) -> bool {
        let inner = self.inner.read();
        for field in inner.indexes.indexed_fields() {
            let Some(index) = inner.indexes.index(&field) else {
                return false;
            };
            for (key, record) in inner.rows.iter() {
                let listed = record
                    .get(&field)
                    .and_then(|value| index.get(value))
                    .is_some_and(|keys| keys.contains(key));
                if !listed {
                    return false;
                }
            }
            for (value, keys) in index.iter() {
                for key in keys {
                    if inner.rows.get(key).and_then(|r| r.get(&field)) != Some(value) {
                        return false;
                    }
                }
            }
        }
        true
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.inner.read().rows.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every record; declared indexes stay declared.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.rows.clear();
        inner.indexes.clear();
        tracing::info!("Cleared cache {}", self.name);
    }

    pub fn partition_of(&self, key: &Value) -> u32 {
        self.partitioner.get_partition(key)
    }

    /// Number of distinct partitions holding at least one key.
    pub fn local_partition_count(&self) -> usize {
        let inner = self.inner.read();
        inner
            .rows
            .keys()
            .map(|key| self.partitioner.get_partition(key))
            .collect::<HashSet<_>>()
            .len()
    }
}

/// A finite snapshot of a store's contents taken by [`RecordStore::scan`].
///
/// Iterating does not hold any lock. `restart` rewinds to the first entry.
#[derive(Clone)]
pub struct Scan {
    entries: Arc<[(Value, Record)]>,
    pos: usize,
}

impl Scan {
    pub fn restart(&mut self) {
        self.pos = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Iterator for Scan {
    type Item = (Value, Record);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.get(self.pos)?.clone();
        self.pos += 1;
        Some(entry)
    }
}
