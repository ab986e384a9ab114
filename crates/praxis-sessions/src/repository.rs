//! Session rows in SQLite.

use praxis_core::{generate_id, now_iso};
use rusqlite::types::ToSql;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::errors::Result;
use crate::types::{NewSession, Session, UpdateSession};

const SESSION_COLUMNS: &str =
    "id, title, important_action, smart_goals, metastrategic_thinking, murphyjitsu, \
     user_id, is_completed, started_at, completed_at, created_at, updated_at";

fn row_to_session(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        title: row.get(1)?,
        important_action: row.get(2)?,
        smart_goals: row.get(3)?,
        metastrategic_thinking: row.get(4)?,
        murphyjitsu: row.get(5)?,
        user_id: row.get(6)?,
        is_completed: row.get(7)?,
        started_at: row.get(8)?,
        completed_at: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

/// Inserts a new session. `startedAt` falls back to now.
pub fn create_session(conn: &Connection, user_id: &str, new: &NewSession) -> Result<Session> {
    let now = now_iso();
    let session = Session {
        id: generate_id("session"),
        title: new.title.clone(),
        important_action: new.important_action.clone(),
        smart_goals: new.smart_goals.clone(),
        metastrategic_thinking: new.metastrategic_thinking.clone(),
        murphyjitsu: new.murphyjitsu.clone(),
        user_id: user_id.to_string(),
        is_completed: false,
        started_at: new.started_at.clone().unwrap_or_else(|| now.clone()),
        completed_at: None,
        created_at: now.clone(),
        updated_at: now,
    };
    let _ = conn.execute(
        "INSERT INTO work_sessions
            (id, title, important_action, smart_goals, metastrategic_thinking, murphyjitsu,
             user_id, is_completed, started_at, completed_at, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            session.id,
            session.title,
            session.important_action,
            session.smart_goals,
            session.metastrategic_thinking,
            session.murphyjitsu,
            session.user_id,
            session.is_completed,
            session.started_at,
            session.completed_at,
            session.created_at,
            session.updated_at,
        ],
    )?;
    Ok(session)
}

/// All of a user's sessions, newest first.
pub fn sessions_for_user(conn: &Connection, user_id: &str) -> Result<Vec<Session>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SESSION_COLUMNS} FROM work_sessions WHERE user_id = ?1
         ORDER BY created_at DESC, id DESC"
    ))?;
    let sessions = stmt
        .query_map([user_id], row_to_session)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(sessions)
}

/// Fetches one session, scoped to its owner.
pub fn session_by_id(conn: &Connection, user_id: &str, id: &str) -> Result<Option<Session>> {
    let session = conn
        .query_row(
            &format!("SELECT {SESSION_COLUMNS} FROM work_sessions WHERE id = ?1 AND user_id = ?2"),
            [id, user_id],
            row_to_session,
        )
        .optional()?;
    Ok(session)
}

/// Applies the provided fields to a session. Returns `None` when the
/// session does not exist for this user.
pub fn update_session(
    conn: &Connection,
    user_id: &str,
    id: &str,
    update: &UpdateSession,
) -> Result<Option<Session>> {
    let mut sets: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(title) = &update.title {
        sets.push(format!("title = ?{}", values.len() + 1));
        values.push(Box::new(title.clone()));
    }
    if let Some(important_action) = &update.important_action {
        sets.push(format!("important_action = ?{}", values.len() + 1));
        values.push(Box::new(important_action.clone()));
    }
    if let Some(smart_goals) = &update.smart_goals {
        sets.push(format!("smart_goals = ?{}", values.len() + 1));
        values.push(Box::new(smart_goals.clone()));
    }
    if let Some(metastrategic_thinking) = &update.metastrategic_thinking {
        sets.push(format!("metastrategic_thinking = ?{}", values.len() + 1));
        values.push(Box::new(metastrategic_thinking.clone()));
    }
    if let Some(murphyjitsu) = &update.murphyjitsu {
        sets.push(format!("murphyjitsu = ?{}", values.len() + 1));
        values.push(Box::new(murphyjitsu.clone()));
    }
    if let Some(is_completed) = update.is_completed {
        sets.push(format!("is_completed = ?{}", values.len() + 1));
        values.push(Box::new(is_completed));
    }
    if let Some(completed_at) = &update.completed_at {
        sets.push(format!("completed_at = ?{}", values.len() + 1));
        values.push(Box::new(completed_at.clone()));
    }
    sets.push(format!("updated_at = ?{}", values.len() + 1));
    values.push(Box::new(now_iso()));

    let sql = format!(
        "UPDATE work_sessions SET {} WHERE id = ?{} AND user_id = ?{}",
        sets.join(", "),
        values.len() + 1,
        values.len() + 2,
    );
    values.push(Box::new(id.to_string()));
    values.push(Box::new(user_id.to_string()));

    let refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
    let changed = conn.execute(&sql, refs.as_slice())?;
    if changed == 0 {
        return Ok(None);
    }
    session_by_id(conn, user_id, id)
}

/// Deletes a session.
pub fn delete_session(conn: &Connection, user_id: &str, id: &str) -> Result<bool> {
    let changed = conn.execute(
        "DELETE FROM work_sessions WHERE id = ?1 AND user_id = ?2",
        [id, user_id],
    )?;
    Ok(changed > 0)
}
