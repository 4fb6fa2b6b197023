//! Error types for mg-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Statement or batch execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Constraint violation (D003)
    #[error("[D003] Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Internal error (D004)
    #[error("[D004] Internal database error: {0}")]
    Internal(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose structured variants for constraint
        // failures, so string matching on the message is the only reliable
        // way to tell a primary-key violation from other execution errors.
        let msg = err.to_string();
        if msg.contains("Constraint Error") || msg.contains("constraint") {
            DbError::ConstraintViolation(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
