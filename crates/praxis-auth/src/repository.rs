//! User rows in SQLite.

use praxis_core::{generate_id, now_iso};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::errors::{AuthError, Result};
use crate::types::{NewUser, User};

const USER_COLUMNS: &str =
    "id, username, email, password, display_name, provider, provider_id, created_at, updated_at";

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        display_name: row.get(4)?,
        provider: row.get(5)?,
        provider_id: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Inserts a new account, rejecting duplicate emails and usernames.
///
/// The email check runs first so a request that collides on both reports
/// the email conflict.
pub fn create_user(conn: &Connection, new_user: &NewUser) -> Result<User> {
    if user_by_email(conn, &new_user.email)?.is_some() {
        return Err(AuthError::EmailTaken);
    }
    if user_by_username(conn, &new_user.username)?.is_some() {
        return Err(AuthError::UsernameTaken);
    }

    let user = User {
        id: generate_id("user"),
        username: new_user.username.clone(),
        email: new_user.email.clone(),
        password: new_user.password_hash.clone(),
        display_name: new_user.display_name.clone(),
        provider: "local".to_string(),
        provider_id: None,
        created_at: now_iso(),
        updated_at: now_iso(),
    };
    let _ = conn.execute(
        "INSERT INTO users (id, username, email, password, display_name, provider, provider_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            user.id,
            user.username,
            user.email,
            user.password,
            user.display_name,
            user.provider,
            user.provider_id,
            user.created_at,
            user.updated_at,
        ],
    )?;
    tracing::debug!(user_id = %user.id, "created user");
    Ok(user)
}

/// Looks up an account by id.
pub fn user_by_id(conn: &Connection, id: &str) -> Result<Option<User>> {
    let user = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            [id],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

/// Looks up an account by username.
pub fn user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    let user = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
            [username],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

/// Looks up an account by email.
pub fn user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    let user = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
            [email],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}
