use crate::record::Value;
use serde::{Deserialize, Serialize};

/// Equality predicate on a field of the joined (right-hand) cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

/// Equality join between two caches on a foreign key.
///
/// Rows are produced from the left-hand cache for every left record whose
/// `join_field` equals the primary key of a right-hand record passing `filter`.
/// The shape corresponds to
/// `SELECT left.<projection> FROM left, right WHERE left.<join_field> = right.<key> AND right.<filter>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinQuery {
    pub left: String,
    pub right: String,
    pub join_field: String,
    pub filter: Option<Filter>,
    /// Left-hand fields to return. Empty selects every field of the left kind.
    pub projection: Vec<String>,
    /// Case-insensitive text equality for the filter.
    pub ignore_case: bool,
}

impl JoinQuery {
    pub fn new(left: &str, right: &str, join_field: &str) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
            join_field: join_field.to_string(),
            filter: None,
            projection: Vec::new(),
            ignore_case: false,
        }
    }

    pub fn filter(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filter = Some(Filter {
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn select(mut self, field: &str) -> Self {
        self.projection.push(field.to_string());
        self
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}

/// One result row; values follow the cursor's column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row(pub Vec<Value>);

impl Row {
    pub fn get(&self, column: usize) -> Option<&Value> {
        self.0.get(column)
    }
}
