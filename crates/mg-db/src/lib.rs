//! mg-db - Database abstraction layer for Migra
//!
//! This crate provides the `Database` trait and the DuckDB implementation.
//! The trait is the engine's only handle on the database: one logical
//! connection carrying both ledger reads and statement execution, so a
//! run's transaction covers everything it does.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
