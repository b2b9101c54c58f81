//! Data Ingestion Module
//!
//! Reads comma-separated text files into caches and renders query results.
//!
//! Input files have one record per line, no header and no quoting. Each parsed line is
//! one atomic put; a malformed line never reaches a cache.

pub mod loader;
pub mod printer;
pub mod types;

#[cfg(test)]
mod tests;
