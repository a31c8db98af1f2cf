//! SQLite persistence via sqlx.

pub mod appointment;
pub mod file;
pub mod pool;
pub mod summary;

use nirogya_types::error::RepositoryError;

/// Map a sqlx error to the domain repository error.
pub(crate) fn map_sqlx(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(db.to_string())
        }
        other => RepositoryError::Query(other.to_string()),
    }
}
