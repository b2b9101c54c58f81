//! Join Execution
//!
//! Index-nested-loop join with the filter pushed down to the right-hand cache:
//! 1. **Filter**: resolve the right-hand candidates with an index lookup (or a scan
//!    when there is no filter or no usable index).
//! 2. **Probe**: for each candidate key, look the left-hand cache up by its join field.
//! 3. **Project**: emit the requested left-hand fields.
//!
//! Steps 2 and 3 run lazily as the cursor is advanced.

use super::types::{JoinQuery, Row};
use crate::error::{GridError, GridResult};
use crate::record::{Record, Value};
use crate::registry::CacheRegistry;
use crate::storage::RecordStore;

use std::collections::VecDeque;
use std::sync::Arc;

/// Validates `query` and returns a cursor over its rows.
///
/// # Errors
/// * `UnknownCache` if either cache is not registered.
/// * `UnknownField` if the join, filter or projection names an undeclared field.
/// * `TypeMismatch` if the join field's type differs from the right-hand key type.
pub fn execute(registry: &CacheRegistry, query: &JoinQuery) -> GridResult<QueryCursor> {
    let left = registry.cache(&query.left)?;
    let right = registry.cache(&query.right)?;

    let join_def = left.kind().require_field(&query.join_field)?;
    if join_def.ty != right.kind().key_type() {
        return Err(GridError::mismatch(
            format!("{}.{} of type {}", right.kind().name, right.kind().key_field, right.kind().key_type()),
            format!("{}.{} of type {}", left.kind().name, join_def.name, join_def.ty),
        ));
    }

    let columns: Vec<String> = if query.projection.is_empty() {
        left.kind().fields.iter().map(|f| f.name.clone()).collect()
    } else {
        for field in &query.projection {
            left.kind().require_field(field)?;
        }
        query.projection.clone()
    };

    let candidates: Vec<Value> = match &query.filter {
        Some(filter) => right
            .find_keys(&filter.field, &filter.value, query.ignore_case)?
            .into_iter()
            .collect(),
        None => right.scan().map(|(key, _)| key).collect(),
    };

    tracing::debug!(
        "Join {} x {} on {}: {} candidate(s) after filter",
        query.left,
        query.right,
        query.join_field,
        candidates.len()
    );

    Ok(QueryCursor {
        columns,
        join_field: query.join_field.clone(),
        left,
        right,
        candidates: candidates.into_iter(),
        pending: VecDeque::new(),
        emitted: 0,
    })
}

/// Lazy sequence of join results.
///
/// Holds handles to both caches and the remaining right-hand candidates; all of it is
/// released when the cursor is dropped, whether or not it was read to the end.
pub struct QueryCursor {
    columns: Vec<String>,
    join_field: String,
    left: Arc<RecordStore>,
    right: Arc<RecordStore>,
    candidates: std::vec::IntoIter<Value>,
    pending: VecDeque<Row>,
    emitted: usize,
}

impl QueryCursor {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn project(&self, record: &Record) -> GridResult<Row> {
        self.columns
            .iter()
            .map(|column| {
                record
                    .get(column)
                    .cloned()
                    .ok_or_else(|| GridError::unknown_field(&record.kind, column))
            })
            .collect::<GridResult<Vec<Value>>>()
            .map(Row)
    }

    /// Probes the left-hand cache for one right-hand key and queues the projected rows.
    fn probe(&mut self, right_key: &Value) -> GridResult<()> {
        if !self.right.contains_key(right_key) {
            return Ok(());
        }
        let left_keys = self.left.lookup(&self.join_field, right_key)?;
        for (_, record) in self.left.get_many(left_keys.iter()) {
            let row = self.project(&record)?;
            self.pending.push_back(row);
        }
        Ok(())
    }
}

impl Iterator for QueryCursor {
    type Item = GridResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.pending.pop_front() {
                self.emitted += 1;
                return Some(Ok(row));
            }
            let right_key = self.candidates.next()?;
            if let Err(err) = self.probe(&right_key) {
                return Some(Err(err));
            }
        }
    }
}

impl Drop for QueryCursor {
    fn drop(&mut self) {
        tracing::debug!(
            "Closed cursor on {} after {} row(s), {} candidate(s) unread",
            self.left.name(),
            self.emitted,
            self.candidates.len()
        );
    }
}
