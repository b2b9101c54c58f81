//! Ingestion Data Types
//!
//! Errors, options and reports for loading delimited text files into caches.

use crate::error::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: field '{field}' is not an integer: '{value}'")]
    InvalidInteger {
        line: usize,
        field: String,
        value: String,
    },

    #[error("line {line}: not valid UTF-8")]
    InvalidUtf8 { line: usize },

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error(transparent)]
    Store(#[from] GridError),
}

impl LoadError {
    /// True for errors confined to one input line.
    pub fn is_line_error(&self) -> bool {
        matches!(
            self,
            LoadError::FieldCount { .. }
                | LoadError::InvalidInteger { .. }
                | LoadError::InvalidUtf8 { .. }
                | LoadError::Malformed { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Abort on the first malformed line instead of skipping it.
    pub strict: bool,
    /// Print every input line to stdout as it is read.
    pub echo: bool,
}

/// Outcome of one file load. Skipped lines keep their error.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<LoadError>,
}
