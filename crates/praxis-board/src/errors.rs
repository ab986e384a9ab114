//! Error types for the board.

use thiserror::Error;

/// Errors produced by board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Underlying SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The referenced task group does not exist (or belongs to someone else).
    #[error("Task group not found")]
    GroupNotFound,

    /// The referenced task does not exist (or belongs to someone else).
    #[error("Task not found")]
    TaskNotFound,

    /// A reorder request named a position outside the container.
    #[error("invalid position: {message}")]
    InvalidPosition {
        /// Which index was bad and what the container holds.
        message: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BoardError>;
