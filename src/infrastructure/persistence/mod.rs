//! Storage backend implementations.
//!
//! Two concrete implementations of [`crate::domain::stores::LinkStore`]:
//!
//! - [`JsonFileStore`] - whole-file read-modify-write over a flat JSON file
//! - [`SqliteStore`] - embedded SQLite database via an owned connection pool
//!
//! [`factory::create_store`] selects one by configuration at startup.

pub mod factory;
pub mod json_store;
pub mod sqlite_store;

pub use factory::create_store;
pub use json_store::JsonFileStore;
pub use sqlite_store::SqliteStore;
