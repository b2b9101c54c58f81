//! Per-cache Index Manager
//!
//! Owns every equality index declared on one cache and keeps them in step with the
//! cache's rows. The owning `RecordStore` calls `on_write`/`on_delete` while it still
//! holds its write lock, so readers never see rows and indexes disagree.

use super::equality::EqualityIndex;
use crate::error::{GridError, GridResult};
use crate::record::{Record, RecordKind, Value};

use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Clone)]
pub struct IndexManager {
    cache: String,
    kind: RecordKind,
    indexes: IndexMap<String, EqualityIndex>,
}

impl IndexManager {
    pub fn new(cache: &str, kind: RecordKind) -> Self {
        Self {
            cache: cache.to_string(),
            kind,
            indexes: IndexMap::new(),
        }
    }

    /// Registers an equality index on `field` and backfills it from `existing`.
    ///
    /// # Errors
    /// * `UnknownField` if the record kind has no such field.
    /// * `DuplicateIndex` if the field is already indexed.
    pub fn declare<'a, I>(&mut self, field: &str, existing: I) -> GridResult<()>
    where
        I: IntoIterator<Item = (&'a Value, &'a Record)>,
    {
        self.kind.require_field(field)?;

        if self.indexes.contains_key(field) {
            return Err(GridError::DuplicateIndex {
                cache: self.cache.clone(),
                field: field.to_string(),
            });
        }

        let mut index = EqualityIndex::new(field);
        let mut backfilled = 0usize;
        for (key, record) in existing {
            if let Some(value) = record.get(field) {
                index.insert(value.clone(), key.clone());
                backfilled += 1;
            }
        }

        tracing::debug!(
            "Declared index {}.{} ({} existing records)",
            self.cache,
            field,
            backfilled
        );
        self.indexes.insert(field.to_string(), index);
        Ok(())
    }

    /// Applies a put. `old` is the record being replaced, if any.
    ///
    /// Fields whose value did not change are left untouched, so repeating a put
    /// with an identical record is a no-op for every index.
    pub fn on_write(&mut self, key: &Value, old: Option<&Record>, new: &Record) {
        for (field, index) in self.indexes.iter_mut() {
            let old_value = old.and_then(|r| r.get(field));
            let new_value = new.get(field);
            if old_value == new_value {
                continue;
            }
            if let Some(value) = old_value {
                index.remove(value, key);
            }
            if let Some(value) = new_value {
                index.insert(value.clone(), key.clone());
            }
        }
    }

    pub fn on_delete(&mut self, key: &Value, old: &Record) {
        for (field, index) in self.indexes.iter_mut() {
            if let Some(value) = old.get(field) {
                index.remove(value, key);
            }
        }
    }

    /// Keys whose `field` equals `value`, or `None` when `field` is not indexed.
    pub fn lookup(&self, field: &str, value: &Value) -> Option<IndexSet<Value>> {
        let index = self.indexes.get(field)?;
        Some(index.get(value).cloned().unwrap_or_default())
    }

    pub fn is_indexed(&self, field: &str) -> bool {
        self.indexes.contains_key(field)
    }

    pub fn indexed_fields(&self) -> Vec<String> {
        self.indexes.keys().cloned().collect()
    }

    /// Distinct-value count of the index on `field`.
    pub fn index_size(&self, field: &str) -> Option<usize> {
        self.indexes.get(field).map(EqualityIndex::distinct_values)
    }

    /// True if any index still references `key`.
    pub fn references(&self, key: &Value) -> bool {
        self.indexes.values().any(|index| index.contains_key(key))
    }

    pub fn index(&self, field: &str) -> Option<&EqualityIndex> {
        self.indexes.get(field)
    }

    pub fn clear(&mut self) {
        for index in self.indexes.values_mut() {
            index.clear();
        }
    }
}
