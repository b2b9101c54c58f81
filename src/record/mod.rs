//! Record Model
//!
//! Typed field values, record kinds (schemas) and the records stored in caches.
//!
//! ## Core Concepts
//! - **`Value`**: An integer or string field value; also used as primary key and index key.
//! - **`RecordKind`**: The declared fields of one cache, including which field is the primary key.
//! - **`Entity`**: Bridges plain Rust structs (`Organization`, `Person`) to generic `Record`s.

pub mod entity;
pub mod types;

pub use entity::{Entity, Organization, Person};
pub use types::{FieldDef, FieldType, Record, RecordKind, Value};
