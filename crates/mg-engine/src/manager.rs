//! Migration manager: discovery, ordering, and the run-scoped transaction.
//!
//! The manager is the only component that opens, commits, or aborts a
//! transaction. One `migrate` or `rollback` invocation is one transaction:
//! either every artifact it touched is committed, or none is.

use crate::error::EngineResult;
use crate::executor::MigrationExecutor;
use crate::ledger::Ledger;
use mg_core::{Artifact, ArtifactSource};
use mg_db::Database;
use std::sync::Arc;

/// Result of a migrate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrateOutcome {
    /// Artifacts applied in this run
    pub applied: usize,
    /// Artifacts skipped because their version was already recorded
    pub skipped: usize,
}

/// Result of a rollback run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// Database already at or below the target version; no transaction was
    /// opened and nothing executed.
    NoOp { current: Option<i64> },
    /// Artifacts reverted, most recent first.
    Reverted { count: usize },
}

/// Applied/pending state of one discovered artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStatus {
    pub name: String,
    pub version: i64,
    pub applied: bool,
}

pub struct MigrationManager {
    db: Arc<dyn Database>,
    source: Box<dyn ArtifactSource>,
    executor: MigrationExecutor,
    ledger: Ledger,
}

impl MigrationManager {
    /// Build a manager over an injected connection handle and artifact
    /// source, and ensure the history table exists (idempotent DDL, runs
    /// outside any transaction).
    pub async fn new(
        db: Arc<dyn Database>,
        source: Box<dyn ArtifactSource>,
    ) -> EngineResult<Self> {
        let ledger = Ledger::new(db.clone());
        ledger.ensure_schema().await?;
        let executor = MigrationExecutor::new(db.clone());
        Ok(Self {
            db,
            source,
            executor,
            ledger,
        })
    }

    /// List and parse every artifact, ascending lexical order.
    ///
    /// Validation happens here, before any execution: a missing root, an
    /// unreadable file, a wrong suffix, or an unparseable version fails the
    /// whole run without touching the database.
    fn load_artifacts(&self) -> EngineResult<Vec<Artifact>> {
        let names = self.source.list()?;
        let mut artifacts = Vec::with_capacity(names.len());
        for name in &names {
            let content = self.source.read(name)?;
            artifacts.push(Artifact::parse(name, &content)?);
        }
        Ok(artifacts)
    }

    /// Apply all pending migrations inside one all-or-nothing transaction.
    pub async fn migrate(&self) -> EngineResult<MigrateOutcome> {
        let artifacts = self.load_artifacts()?;
        log::info!(
            "Starting migration run: {} artifacts discovered on {}",
            artifacts.len(),
            self.db.db_type()
        );

        self.db.begin().await?;
        match self.migrate_in_txn(&artifacts).await {
            Ok(outcome) => {
                self.db.commit().await?;
                log::info!(
                    "Migration run committed: {} applied, {} skipped",
                    outcome.applied,
                    outcome.skipped
                );
                Ok(outcome)
            }
            Err(e) => {
                log::error!("Migration run failed, rolling back: {}", e);
                if let Err(rb) = self.db.rollback().await {
                    log::error!("Transaction rollback also failed: {}", rb);
                }
                Err(e)
            }
        }
    }

    async fn migrate_in_txn(&self, artifacts: &[Artifact]) -> EngineResult<MigrateOutcome> {
        let mut outcome = MigrateOutcome {
            applied: 0,
            skipped: 0,
        };
        for artifact in artifacts {
            if self.ledger.is_applied(artifact.version).await? {
                log::info!(
                    "Migration v{} ({}) already applied, skipping",
                    artifact.version,
                    artifact.name
                );
                outcome.skipped += 1;
            } else {
                self.executor.apply_forward(artifact).await?;
                outcome.applied += 1;
            }
        }
        Ok(outcome)
    }

    /// Revert applied migrations down to `target_version`, most recent
    /// first, inside one all-or-nothing transaction.
    ///
    /// Descending order is mandatory: later migrations may depend on
    /// structures created by earlier ones, so reverting out of order risks
    /// reverse statements referencing already-dropped objects.
    pub async fn rollback(&self, target_version: i64) -> EngineResult<RollbackOutcome> {
        let current = self.ledger.current_version().await?;
        let current_version = match current {
            Some(v) if v > target_version => v,
            _ => {
                log::info!(
                    "No rollbacks required: database at {:?}, target {}",
                    current,
                    target_version
                );
                return Ok(RollbackOutcome::NoOp { current });
            }
        };

        let mut artifacts = self.load_artifacts()?;
        artifacts.sort_by(|a, b| b.name.cmp(&a.name));
        let selected: Vec<Artifact> = artifacts
            .into_iter()
            .filter(|a| a.version > target_version && a.version <= current_version)
            .collect();
        log::info!(
            "Rolling back from v{} to v{}: {} artifacts",
            current_version,
            target_version,
            selected.len()
        );

        self.db.begin().await?;
        match self.rollback_in_txn(&selected).await {
            Ok(count) => {
                self.db.commit().await?;
                log::info!("Rollback run committed: {} reverted", count);
                Ok(RollbackOutcome::Reverted { count })
            }
            Err(e) => {
                log::error!("Rollback run failed, rolling back: {}", e);
                if let Err(rb) = self.db.rollback().await {
                    log::error!("Transaction rollback also failed: {}", rb);
                }
                Err(e)
            }
        }
    }

    async fn rollback_in_txn(&self, artifacts: &[Artifact]) -> EngineResult<usize> {
        for artifact in artifacts {
            self.executor.apply_reverse(artifact).await?;
        }
        Ok(artifacts.len())
    }

    /// Highest applied version, or None when no migrations are applied.
    /// Autocommit read; no write transaction is opened.
    pub async fn current_version(&self) -> EngineResult<Option<i64>> {
        self.ledger.current_version().await
    }

    /// Applied/pending state of every discovered artifact, ascending order.
    pub async fn status(&self) -> EngineResult<Vec<ArtifactStatus>> {
        let artifacts = self.load_artifacts()?;
        let mut statuses = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let applied = self.ledger.is_applied(artifact.version).await?;
            statuses.push(ArtifactStatus {
                name: artifact.name,
                version: artifact.version,
                applied,
            });
        }
        Ok(statuses)
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
