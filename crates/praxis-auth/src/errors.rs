//! Error types for account handling.

use thiserror::Error;

/// Errors produced by registration, login, and token verification.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Underlying SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Registration attempted with an email that already has an account.
    #[error("Email already in use")]
    EmailTaken,

    /// Registration attempted with a username that already has an account.
    #[error("Username already exists")]
    UsernameTaken,

    /// Login failed. Deliberately does not say whether the username or the
    /// password was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A bearer token failed signature or expiry checks.
    #[error("invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AuthError>;
