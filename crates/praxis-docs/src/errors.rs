//! Error types for documents.

use thiserror::Error;

/// Errors produced by document operations.
#[derive(Debug, Error)]
pub enum DocError {
    /// Underlying SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The referenced document does not exist (or belongs to someone else).
    #[error("Document not found")]
    DocumentNotFound,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DocError>;
