//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Database abstraction trait for Migra
///
/// One implementation instance wraps exactly one logical connection, so
/// `begin`/`commit`/`rollback` scope every `execute` and query issued
/// through the same handle. Implementations must be Send + Sync.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a single SQL statement, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple `;`-separated SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute a scalar query returning the first column of the first row,
    /// or None when the result is NULL or empty
    async fn query_i64(&self, sql: &str) -> DbResult<Option<i64>>;

    /// Open a transaction (disable autocommit)
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
