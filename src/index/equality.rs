use crate::record::Value;
use indexmap::{IndexMap, IndexSet};

/// Maps each value of one field to the set of primary keys holding that value.
///
/// Key sets keep insertion order so that lookups are deterministic.
/// Empty key sets are never kept.
#[derive(Debug, Clone, Default)]
pub struct EqualityIndex {
    field: String,
    entries: IndexMap<Value, IndexSet<Value>>,
}

impl EqualityIndex {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            entries: IndexMap::new(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn insert(&mut self, value: Value, key: Value) {
        self.entries.entry(value).or_default().insert(key);
    }

    pub fn remove(&mut self, value: &Value, key: &Value) {
        let now_empty = match self.entries.get_mut(value) {
            Some(keys) => {
                keys.shift_remove(key);
                keys.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.entries.shift_remove(value);
        }
    }

    pub fn get(&self, value: &Value) -> Option<&IndexSet<Value>> {
        self.entries.get(value)
    }

    /// Number of distinct indexed values.
    pub fn distinct_values(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &IndexSet<Value>)> {
        self.entries.iter()
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.values().any(|keys| keys.contains(key))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
