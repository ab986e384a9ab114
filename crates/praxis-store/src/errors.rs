//! Error types for the storage layer.

use thiserror::Error;

/// Errors produced while opening the database or running migrations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error (exhaustion, timeouts).
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// A migration failed to apply.
    #[error("migration failed: {message}")]
    Migration {
        /// Details about what went wrong.
        message: String,
    },
}

/// Convenience alias used throughout the storage layer.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_error_displays_message() {
        let err = StoreError::Migration {
            message: "version 3 is missing".to_string(),
        };
        assert_eq!(err.to_string(), "migration failed: version 3 is missing");
    }

    #[test]
    fn sqlite_error_converts() {
        let sqlite_err = rusqlite::Error::QueryReturnedNoRows;
        let err: StoreError = sqlite_err.into();
        assert!(matches!(err, StoreError::Sqlite(_)));
    }
}
