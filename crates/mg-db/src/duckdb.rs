//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::Mutex;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Execute SQL synchronously
    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.conn.lock().unwrap();
        conn.execute(sql, [])
            .map_err(|e| DbError::from(e).with_sql(sql))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(sql).map_err(DbError::from)
    }

    /// Scalar query synchronously
    fn query_i64_sync(&self, sql: &str) -> DbResult<Option<i64>> {
        let conn = self.conn.lock().unwrap();
        match conn.query_row(sql, [], |row| row.get::<_, Option<i64>>(0)) {
            Ok(value) => Ok(value),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DbError::from(e)),
        }
    }
}

impl DbError {
    /// Attach the offending SQL to an execution error message
    fn with_sql(self, sql: &str) -> Self {
        match self {
            DbError::ExecutionError(msg) => DbError::ExecutionError(format!("{}: {}", msg, sql)),
            other => other,
        }
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn query_i64(&self, sql: &str) -> DbResult<Option<i64>> {
        self.query_i64_sync(sql)
    }

    async fn begin(&self) -> DbResult<()> {
        log::debug!("BEGIN TRANSACTION");
        self.execute_batch_sync("BEGIN TRANSACTION;")
    }

    async fn commit(&self) -> DbResult<()> {
        log::debug!("COMMIT");
        self.execute_batch_sync("COMMIT;")
    }

    async fn rollback(&self) -> DbResult<()> {
        log::debug!("ROLLBACK");
        self.execute_batch_sync("ROLLBACK;")
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
