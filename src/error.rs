//! Error taxonomy shared by the record, index, storage, registry and query layers.
//!
//! Every failure is returned to the caller; nothing below the binary swallows errors.
//! A failed write never leaves a store partially updated.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A record (or key) does not match the kind declared for the cache.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// An equality index was declared twice for the same cache and field.
    #[error("index on field '{field}' already declared for cache '{cache}'")]
    DuplicateIndex { cache: String, field: String },

    /// A query or lookup referenced a field the record kind does not declare.
    #[error("record kind '{kind}' has no field '{field}'")]
    UnknownField { kind: String, field: String },

    #[error("cache '{0}' does not exist")]
    UnknownCache(String),
}

pub type GridResult<T> = Result<T, GridError>;

impl GridError {
    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        GridError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub(crate) fn unknown_field(kind: &str, field: &str) -> Self {
        GridError::UnknownField {
            kind: kind.to_string(),
            field: field.to_string(),
        }
    }
}
