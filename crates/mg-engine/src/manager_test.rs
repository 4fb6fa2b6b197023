use super::*;
use crate::error::EngineError;
use mg_core::{CoreError, DirSource};
use mg_db::DuckDbBackend;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_artifact(dir: &Path, name: &str, version: i64, forward: &str, reverse: &str) {
    let content = format!(
        "-- migration {}\n--migration--\n{}\n--rollback--\n{}\n",
        version, forward, reverse
    );
    fs::write(dir.join(name), content).unwrap();
}

async fn manager_for(dir: &Path) -> (Arc<dyn Database>, MigrationManager) {
    let db: Arc<dyn Database> = Arc::new(DuckDbBackend::in_memory().unwrap());
    let manager = MigrationManager::new(db.clone(), Box::new(DirSource::new(dir)))
        .await
        .unwrap();
    (db, manager)
}

fn standard_artifacts(dir: &Path) {
    write_artifact(
        dir,
        "001_users.sql",
        1,
        "CREATE TABLE users (id INTEGER);",
        "DROP TABLE users;",
    );
    write_artifact(
        dir,
        "002_orders.sql",
        2,
        "CREATE TABLE orders (id INTEGER);",
        "DROP TABLE orders;",
    );
    write_artifact(
        dir,
        "003_items.sql",
        3,
        "CREATE TABLE items (id INTEGER);",
        "DROP TABLE items;",
    );
}

#[tokio::test]
async fn test_migrate_applies_all_pending() {
    let dir = TempDir::new().unwrap();
    standard_artifacts(dir.path());
    let (db, manager) = manager_for(dir.path()).await;

    let outcome = manager.migrate().await.unwrap();
    assert_eq!(outcome, MigrateOutcome { applied: 3, skipped: 0 });
    assert_eq!(manager.current_version().await.unwrap(), Some(3));
    assert_eq!(
        db.query_i64("SELECT COUNT(*) FROM users").await.unwrap(),
        Some(0)
    );
}

#[tokio::test]
async fn test_migrate_is_idempotent() {
    let dir = TempDir::new().unwrap();
    standard_artifacts(dir.path());
    let (db, manager) = manager_for(dir.path()).await;

    manager.migrate().await.unwrap();
    let second = manager.migrate().await.unwrap();

    assert_eq!(second, MigrateOutcome { applied: 0, skipped: 3 });
    assert_eq!(manager.current_version().await.unwrap(), Some(3));
    assert_eq!(
        db.query_i64("SELECT COUNT(*) FROM history").await.unwrap(),
        Some(3)
    );
}

#[tokio::test]
async fn test_migrate_picks_up_new_artifacts_only() {
    let dir = TempDir::new().unwrap();
    standard_artifacts(dir.path());
    let (_db, manager) = manager_for(dir.path()).await;
    manager.migrate().await.unwrap();

    write_artifact(
        dir.path(),
        "004_tags.sql",
        4,
        "CREATE TABLE tags (id INTEGER);",
        "DROP TABLE tags;",
    );
    let outcome = manager.migrate().await.unwrap();
    assert_eq!(outcome, MigrateOutcome { applied: 1, skipped: 3 });
    assert_eq!(manager.current_version().await.unwrap(), Some(4));
}

#[tokio::test]
async fn test_migrate_is_all_or_nothing() {
    let dir = TempDir::new().unwrap();
    write_artifact(
        dir.path(),
        "001_users.sql",
        1,
        "CREATE TABLE users (id INTEGER);",
        "DROP TABLE users;",
    );
    write_artifact(
        dir.path(),
        "002_orders.sql",
        2,
        "CREATE TABLE orders (id INTEGER);",
        "DROP TABLE orders;",
    );
    write_artifact(
        dir.path(),
        "003_broken.sql",
        3,
        "INSERT INTO no_such_table VALUES (1);",
        "",
    );
    let (db, manager) = manager_for(dir.path()).await;

    let err = manager.migrate().await.unwrap_err();
    assert!(matches!(err, EngineError::Db(_)));

    // Versions 1 and 2 succeeded mid-run but the whole run rolled back.
    assert_eq!(manager.current_version().await.unwrap(), None);
    assert_eq!(
        db.query_i64("SELECT COUNT(*) FROM history").await.unwrap(),
        Some(0)
    );
    assert!(db.query_i64("SELECT COUNT(*) FROM users").await.is_err());
}

#[tokio::test]
async fn test_invalid_artifact_rejected_before_execution() {
    let dir = TempDir::new().unwrap();
    write_artifact(
        dir.path(),
        "001_users.sql",
        1,
        "CREATE TABLE users (id INTEGER);",
        "DROP TABLE users;",
    );
    fs::write(dir.path().join("002_bad.sql"), "no version on this line\n").unwrap();
    let (db, manager) = manager_for(dir.path()).await;

    let err = manager.migrate().await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Artifact(CoreError::InvalidArtifact { .. })
    ));
    // Validation happens before the run opens; nothing executed.
    assert!(db.query_i64("SELECT COUNT(*) FROM users").await.is_err());
    assert_eq!(manager.current_version().await.unwrap(), None);
}

#[tokio::test]
async fn test_wrong_suffix_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("001_users.txt"), "-- migration 1\n").unwrap();
    let (_db, manager) = manager_for(dir.path()).await;

    let err = manager.migrate().await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Artifact(CoreError::InvalidArtifact { .. })
    ));
}

#[tokio::test]
async fn test_missing_migration_root_is_discovery_failure() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let db: Arc<dyn Database> = Arc::new(DuckDbBackend::in_memory().unwrap());
    let manager = MigrationManager::new(db, Box::new(DirSource::new(&missing)))
        .await
        .unwrap();

    let err = manager.migrate().await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Artifact(CoreError::Discovery { .. })
    ));
}

#[tokio::test]
async fn test_rollback_runs_in_descending_order() {
    let dir = TempDir::new().unwrap();
    write_artifact(
        dir.path(),
        "001_base.sql",
        1,
        "CREATE TABLE base (id INTEGER);",
        "DROP TABLE base;",
    );
    write_artifact(
        dir.path(),
        "002_t2.sql",
        2,
        "CREATE TABLE t2 (id INTEGER);",
        "DROP TABLE t2;\nINSERT INTO audit SELECT COALESCE(max(ord), 0) + 1, 2 FROM audit;",
    );
    write_artifact(
        dir.path(),
        "003_t3.sql",
        3,
        "CREATE TABLE t3 (id INTEGER);",
        "DROP TABLE t3;\nINSERT INTO audit SELECT COALESCE(max(ord), 0) + 1, 3 FROM audit;",
    );
    let (db, manager) = manager_for(dir.path()).await;
    manager.migrate().await.unwrap();
    db.execute("CREATE TABLE audit (ord BIGINT, version BIGINT)")
        .await
        .unwrap();

    let outcome = manager.rollback(1).await.unwrap();
    assert_eq!(outcome, RollbackOutcome::Reverted { count: 2 });
    assert_eq!(manager.current_version().await.unwrap(), Some(1));

    // Version 3 reverted before version 2.
    assert_eq!(
        db.query_i64("SELECT version FROM audit WHERE ord = 1")
            .await
            .unwrap(),
        Some(3)
    );
    assert_eq!(
        db.query_i64("SELECT version FROM audit WHERE ord = 2")
            .await
            .unwrap(),
        Some(2)
    );
}

#[tokio::test]
async fn test_rollback_to_current_is_no_op() {
    let dir = TempDir::new().unwrap();
    standard_artifacts(dir.path());
    let (db, manager) = manager_for(dir.path()).await;
    manager.migrate().await.unwrap();

    let outcome = manager.rollback(3).await.unwrap();
    assert_eq!(outcome, RollbackOutcome::NoOp { current: Some(3) });

    let above = manager.rollback(9).await.unwrap();
    assert_eq!(above, RollbackOutcome::NoOp { current: Some(3) });

    // Zero ledger mutations and zero statement executions.
    assert_eq!(manager.current_version().await.unwrap(), Some(3));
    assert_eq!(
        db.query_i64("SELECT COUNT(*) FROM users").await.unwrap(),
        Some(0)
    );
}

#[tokio::test]
async fn test_rollback_on_empty_ledger_is_no_op() {
    let dir = TempDir::new().unwrap();
    standard_artifacts(dir.path());
    let (_db, manager) = manager_for(dir.path()).await;

    let outcome = manager.rollback(0).await.unwrap();
    assert_eq!(outcome, RollbackOutcome::NoOp { current: None });
}

#[tokio::test]
async fn test_rollback_is_all_or_nothing() {
    let dir = TempDir::new().unwrap();
    write_artifact(
        dir.path(),
        "001_base.sql",
        1,
        "CREATE TABLE base (id INTEGER);",
        "DROP TABLE base;",
    );
    write_artifact(
        dir.path(),
        "002_broken.sql",
        2,
        "CREATE TABLE t2 (id INTEGER);",
        "DROP TABLE no_such_table;",
    );
    write_artifact(
        dir.path(),
        "003_t3.sql",
        3,
        "CREATE TABLE t3 (id INTEGER);",
        "DROP TABLE t3;",
    );
    let (db, manager) = manager_for(dir.path()).await;
    manager.migrate().await.unwrap();

    // Version 3 reverts cleanly, then version 2 fails; the whole rollback
    // transaction aborts and schema plus ledger return to pre-run state.
    let err = manager.rollback(0).await.unwrap_err();
    assert!(matches!(err, EngineError::Db(_)));
    assert_eq!(manager.current_version().await.unwrap(), Some(3));
    assert_eq!(
        db.query_i64("SELECT COUNT(*) FROM t3").await.unwrap(),
        Some(0)
    );
}

#[tokio::test]
async fn test_round_trip_restores_ledger() {
    let dir = TempDir::new().unwrap();
    standard_artifacts(dir.path());
    let (db, manager) = manager_for(dir.path()).await;

    manager.migrate().await.unwrap();
    let outcome = manager.rollback(0).await.unwrap();
    assert_eq!(outcome, RollbackOutcome::Reverted { count: 3 });

    assert_eq!(manager.current_version().await.unwrap(), None);
    assert_eq!(
        db.query_i64("SELECT COUNT(*) FROM history").await.unwrap(),
        Some(0)
    );
}

#[tokio::test]
async fn test_status_reports_applied_and_pending() {
    let dir = TempDir::new().unwrap();
    standard_artifacts(dir.path());
    let (_db, manager) = manager_for(dir.path()).await;
    manager.migrate().await.unwrap();

    write_artifact(
        dir.path(),
        "004_tags.sql",
        4,
        "CREATE TABLE tags (id INTEGER);",
        "DROP TABLE tags;",
    );

    let statuses = manager.status().await.unwrap();
    assert_eq!(statuses.len(), 4);
    assert!(statuses[..3].iter().all(|s| s.applied));
    assert_eq!(
        statuses[3],
        ArtifactStatus {
            name: "004_tags.sql".to_string(),
            version: 4,
            applied: false,
        }
    );
}

#[tokio::test]
async fn test_empty_migration_directory() {
    let dir = TempDir::new().unwrap();
    let (_db, manager) = manager_for(dir.path()).await;

    let outcome = manager.migrate().await.unwrap();
    assert_eq!(outcome, MigrateOutcome { applied: 0, skipped: 0 });
    assert_eq!(manager.current_version().await.unwrap(), None);
}
