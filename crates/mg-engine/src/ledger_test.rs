use super::*;
use mg_db::DuckDbBackend;

async fn ledger() -> Ledger {
    let db: Arc<dyn Database> = Arc::new(DuckDbBackend::in_memory().unwrap());
    let ledger = Ledger::new(db);
    ledger.ensure_schema().await.unwrap();
    ledger
}

#[tokio::test]
async fn test_ensure_schema_is_idempotent() {
    let ledger = ledger().await;
    ledger.ensure_schema().await.unwrap();
    ledger.ensure_schema().await.unwrap();
}

#[tokio::test]
async fn test_empty_ledger() {
    let ledger = ledger().await;
    assert_eq!(ledger.current_version().await.unwrap(), None);
    assert!(!ledger.is_applied(1).await.unwrap());
}

#[tokio::test]
async fn test_record_and_query() {
    let ledger = ledger().await;
    ledger.record(1, "001_a.sql", Utc::now()).await.unwrap();
    ledger.record(2, "002_b.sql", Utc::now()).await.unwrap();

    assert!(ledger.is_applied(1).await.unwrap());
    assert!(ledger.is_applied(2).await.unwrap());
    assert!(!ledger.is_applied(3).await.unwrap());
    assert_eq!(ledger.current_version().await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_duplicate_version_is_ledger_write_error() {
    let ledger = ledger().await;
    ledger.record(1, "001_a.sql", Utc::now()).await.unwrap();

    let err = ledger
        .record(1, "001_dup.sql", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::LedgerWrite { version: 1, .. }));
}

#[tokio::test]
async fn test_erase_by_name() {
    let ledger = ledger().await;
    ledger.record(1, "001_a.sql", Utc::now()).await.unwrap();

    let affected = ledger.erase("001_a.sql").await.unwrap();
    assert_eq!(affected, 1);
    assert!(!ledger.is_applied(1).await.unwrap());
    assert_eq!(ledger.current_version().await.unwrap(), None);
}

#[tokio::test]
async fn test_erase_unknown_name_affects_zero_rows() {
    let ledger = ledger().await;
    let affected = ledger.erase("never_applied.sql").await.unwrap();
    assert_eq!(affected, 0);
}

#[tokio::test]
async fn test_name_with_quote_is_escaped() {
    let ledger = ledger().await;
    ledger.record(1, "o'brien.sql", Utc::now()).await.unwrap();

    let affected = ledger.erase("o'brien.sql").await.unwrap();
    assert_eq!(affected, 1);
}
