//! Error types for review storage.

use thiserror::Error;

/// Errors produced by review stores.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Underlying SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error (exhaustion, timeouts).
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReviewError>;
