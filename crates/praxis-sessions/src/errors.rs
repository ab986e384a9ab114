//! Error types for work sessions.

use thiserror::Error;

/// Errors produced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Underlying SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The referenced session does not exist (or belongs to someone else).
    #[error("Session not found")]
    SessionNotFound,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SessionError>;
