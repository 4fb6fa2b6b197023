//! Migration executor: runs one artifact's statements and keeps the ledger
//! in step.
//!
//! The executor owns no transaction boundary. It executes on whatever
//! transactional context the caller has open on the shared connection, so
//! a failed run can undo everything this executor did.

use crate::error::EngineResult;
use crate::ledger::Ledger;
use chrono::Utc;
use mg_core::Artifact;
use mg_db::Database;
use std::sync::Arc;

pub struct MigrationExecutor {
    db: Arc<dyn Database>,
    ledger: Ledger,
}

impl MigrationExecutor {
    pub fn new(db: Arc<dyn Database>) -> Self {
        let ledger = Ledger::new(db.clone());
        Self { db, ledger }
    }

    /// Apply an artifact's forward statements in file order, then record it
    /// in the ledger.
    pub async fn apply_forward(&self, artifact: &Artifact) -> EngineResult<()> {
        log::info!(
            "Applying migration v{} ({}): {} statements",
            artifact.version,
            artifact.name,
            artifact.forward.len()
        );
        for sql in &artifact.forward {
            log::debug!("Executing: {}", sql);
            self.db.execute(sql).await?;
        }
        self.ledger
            .record(artifact.version, &artifact.name, Utc::now())
            .await
    }

    /// Apply an artifact's reverse statements in file order, then erase its
    /// ledger record. Erasing a record that was never written is a no-op
    /// (logged, not an error).
    pub async fn apply_reverse(&self, artifact: &Artifact) -> EngineResult<()> {
        log::info!(
            "Reverting migration v{} ({}): {} statements",
            artifact.version,
            artifact.name,
            artifact.reverse.len()
        );
        for sql in &artifact.reverse {
            log::debug!("Executing: {}", sql);
            self.db.execute(sql).await?;
        }
        let affected = self.ledger.erase(&artifact.name).await?;
        if affected == 0 {
            log::warn!(
                "No history record found for {} while reverting",
                artifact.name
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
