//! Completion bookkeeping on top of the repository.

use rusqlite::Connection;

use crate::errors::Result;
use crate::repository;
use crate::types::{Session, UpdateSession};

/// Applies an update, stamping completion timestamps as needed.
///
/// Flipping `isCompleted` on without an explicit `completedAt` records the
/// current time; flipping it off clears the timestamp. Explicit values win
/// in both directions.
pub fn apply_update(
    conn: &Connection,
    user_id: &str,
    id: &str,
    update: &UpdateSession,
) -> Result<Option<Session>> {
    let mut update = update.clone();
    match update.is_completed {
        Some(true) if update.completed_at.is_none() => {
            update.completed_at = Some(Some(praxis_core::now_iso()));
        }
        Some(false) if update.completed_at.is_none() => {
            update.completed_at = Some(None);
        }
        _ => {}
    }
    repository::update_session(conn, user_id, id, &update)
}
