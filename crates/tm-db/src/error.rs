//! Error types for tm-db

use thiserror::Error;
use tm_core::CoreError;

/// Storage operation errors
///
/// Failures from the persistence collaborator are propagated unchanged and
/// never swallowed; the core performs no retries around them.
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Statement execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Query error (D003)
    #[error("[D003] SQL query failed: {0}")]
    QueryError(String),

    /// Mutex poisoned (D004)
    #[error("[D004] Database mutex poisoned: {0}")]
    MutexPoisoned(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

/// Error type for a full upgrade run: resolution/codec failures from the
/// core, or storage failures from the backend.
#[derive(Error, Debug)]
pub enum UpgradeError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type alias for UpgradeError
pub type UpgradeResult<T> = Result<T, UpgradeError>;
