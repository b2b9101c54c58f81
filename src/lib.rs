//! Embedded Record Grid Library
//!
//! In-memory caches of typed records with equality indexes and a cross-cache join.
//! The binary (`main.rs`) loads two caches from CSV files and runs one join over them.
//!
//! ## Architecture Modules
//! - **`record`**: Field values, record kinds and the `Organization`/`Person` entities.
//! - **`index`**: Equality indexes kept consistent with their cache on every write.
//! - **`storage`**: The `RecordStore` table and logical partition placement.
//! - **`registry`**: Named caches with replication-mode metadata (get-or-create).
//! - **`query`**: Index-nested-loop join with predicate pushdown, plus HTTP handlers.
//! - **`ingestion`**: CSV loading and result printing.
//! - **`config`**: Command-line configuration.

pub mod config;
pub mod error;
pub mod index;
pub mod ingestion;
pub mod query;
pub mod record;
pub mod registry;
pub mod storage;

pub use error::{GridError, GridResult};
