//! Query Module
//!
//! Answers equality joins between two caches using their indexes.
//!
//! ## Overview
//! Only one query shape is supported: the left-hand cache references the right-hand
//! cache's primary key through a foreign-key field, an optional equality filter applies
//! to the right-hand cache, and left-hand fields are projected.
//!
//! ## Submodules
//! - **`types`**: `JoinQuery` builder and result `Row`s.
//! - **`engine`**: Validation, predicate pushdown and the lazy `QueryCursor`.
//! - **`employees`**: Cache declarations for organizations/persons and `employees_of`.
//! - **`handlers`**: HTTP handlers for the Axum web server.

pub mod employees;
pub mod engine;
pub mod handlers;
pub mod types;

pub use employees::{ORG_CACHE, PERSON_CACHE, create_caches, employees_of};
pub use engine::{QueryCursor, execute};
pub use types::{Filter, JoinQuery, Row};
