//! Error types for mg-engine

use mg_core::CoreError;
use mg_db::DbError;
use thiserror::Error;

/// Engine error type: the closed set of failures a run can surface.
///
/// Every variant raised inside an open run aborts that run's transaction
/// wholesale before it propagates; there is no partial-success reporting.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid artifact, discovery failure, or artifact read failure
    #[error(transparent)]
    Artifact(#[from] CoreError),

    /// Statement or batch execution failure
    #[error(transparent)]
    Db(#[from] DbError),

    /// Ledger insert hit the version primary key. Unreachable when the
    /// manager's applied-check ran first; a defect signal if seen.
    #[error("[G001] Ledger write failed for version {version}: {message}")]
    LedgerWrite { version: i64, message: String },
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;
