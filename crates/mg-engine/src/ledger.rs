//! History ledger: the persisted record of applied migration versions.
//!
//! One row per applied version in the `history` table. A row's presence is
//! the sole source of truth for "has this migration been applied". All
//! calls go through the shared [`Database`] handle and therefore
//! participate in whatever transaction the caller has open.

use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use mg_db::{Database, DbError};
use std::sync::Arc;

const HISTORY_TABLE_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS history (
    version INTEGER PRIMARY KEY,
    file VARCHAR,
    timestamp TIMESTAMP
);";

/// Query and mutation surface over the `history` table.
pub struct Ledger {
    db: Arc<dyn Database>,
}

impl Ledger {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    /// Create the `history` table if absent. Safe to call on every startup.
    pub async fn ensure_schema(&self) -> EngineResult<()> {
        self.db.execute_batch(HISTORY_TABLE_SCHEMA).await?;
        Ok(())
    }

    /// True iff a history record with this version exists.
    pub async fn is_applied(&self, version: i64) -> EngineResult<bool> {
        let count = self
            .db
            .query_i64(&format!(
                "SELECT COUNT(*) FROM history WHERE version = {}",
                version
            ))
            .await?;
        Ok(count.unwrap_or(0) > 0)
    }

    /// Highest applied version, or None when no migrations are applied.
    pub async fn current_version(&self) -> EngineResult<Option<i64>> {
        // version is INTEGER; cast so the scalar read is always a BIGINT.
        let version = self
            .db
            .query_i64("SELECT CAST(max(version) AS BIGINT) FROM history")
            .await?;
        Ok(version)
    }

    /// Insert a history record. A duplicate version hits the primary key
    /// and surfaces as [`EngineError::LedgerWrite`].
    pub async fn record(
        &self,
        version: i64,
        name: &str,
        applied_at: DateTime<Utc>,
    ) -> EngineResult<()> {
        let sql = format!(
            "INSERT INTO history VALUES ({}, '{}', TIMESTAMP '{}')",
            version,
            quote_literal(name),
            applied_at.format("%Y-%m-%d %H:%M:%S"),
        );
        match self.db.execute(&sql).await {
            Ok(_) => Ok(()),
            Err(DbError::ConstraintViolation(message)) => {
                Err(EngineError::LedgerWrite { version, message })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the record whose artifact name matches; returns rows affected.
    /// Zero rows means the artifact was never applied; the caller decides
    /// what to make of that.
    pub async fn erase(&self, name: &str) -> EngineResult<usize> {
        let affected = self
            .db
            .execute(&format!(
                "DELETE FROM history WHERE file = '{}'",
                quote_literal(name)
            ))
            .await?;
        Ok(affected)
    }
}

/// Escape a string for use as a SQL literal.
fn quote_literal(s: &str) -> String {
    s.replace('\'', "''")
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
