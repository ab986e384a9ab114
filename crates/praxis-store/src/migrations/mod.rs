//! Versioned schema migrations.
//!
//! Migrations are embedded SQL files applied in order inside a transaction.
//! The `schema_version` table records what has already run, so calling
//! [`run_migrations`] on every startup is safe.

use rusqlite::Connection;

use crate::errors::{Result, StoreError};

struct Migration {
    version: u32,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "initial schema: users, documents, board, sessions, reviews",
    sql: include_str!("v001_schema.sql"),
}];

/// Applies all pending migrations, returning the resulting schema version.
pub fn run_migrations(conn: &Connection) -> Result<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        )",
    )?;

    let current = current_version(conn)?;
    for migration in MIGRATIONS {
        if migration.version <= current {
            continue;
        }
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.sql)
            .map_err(|e| StoreError::Migration {
                message: format!(
                    "migration {} ({}) failed: {e}",
                    migration.version, migration.description
                ),
            })?;
        let _ = tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [migration.version],
        )?;
        tx.commit()?;
        tracing::info!(
            version = migration.version,
            description = migration.description,
            "applied migration"
        );
    }

    current_version(conn)
}

/// Highest migration version recorded in the database.
pub fn current_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> = conn.query_row(
        "SELECT MAX(version) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version.unwrap_or(0))
}

/// Highest migration version this build knows about.
#[must_use]
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON").unwrap();
        let _ = run_migrations(&conn).unwrap();
        conn
    }

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        names
    }

    fn insert_user(conn: &Connection, id: &str) {
        let _ = conn
            .execute(
                "INSERT INTO users (id, username, email, created_at, updated_at)
                 VALUES (?1, ?1, ?1 || '@example.com', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
                [id],
            )
            .unwrap();
    }

    #[test]
    fn migrations_create_all_tables() {
        let conn = setup();
        let tables = table_names(&conn);
        for expected in [
            "documents",
            "reviews",
            "schema_version",
            "task_groups",
            "tasks",
            "users",
            "work_sessions",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing table {expected}");
        }
    }

    #[test]
    fn migrations_are_idempotent() {
        let conn = setup();
        let first = current_version(&conn).unwrap();
        let second = run_migrations(&conn).unwrap();
        assert_eq!(first, second);
        assert_eq!(second, latest_version());
    }

    #[test]
    fn fresh_database_reports_version_zero() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (version INTEGER PRIMARY KEY, applied_at TEXT)",
        )
        .unwrap();
        assert_eq!(current_version(&conn).unwrap(), 0);
    }

    #[test]
    fn deleting_user_cascades_owned_rows() {
        let conn = setup();
        insert_user(&conn, "user-1");
        let _ = conn
            .execute(
                "INSERT INTO task_groups (id, title, user_id, created_at, updated_at)
                 VALUES ('group-1', 'Inbox', 'user-1', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
                [],
            )
            .unwrap();
        let _ = conn
            .execute(
                "INSERT INTO tasks (id, title, group_id, user_id, created_at, updated_at)
                 VALUES ('task-1', 'Ship it', 'group-1', 'user-1', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        let _ = conn.execute("DELETE FROM users WHERE id = 'user-1'", []).unwrap();

        let groups: i64 = conn
            .query_row("SELECT COUNT(*) FROM task_groups", [], |row| row.get(0))
            .unwrap();
        let tasks: i64 = conn
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))
            .unwrap();
        assert_eq!(groups, 0);
        assert_eq!(tasks, 0);
    }

    #[test]
    fn deleting_group_cascades_its_tasks_only() {
        let conn = setup();
        insert_user(&conn, "user-1");
        let _ = conn
            .execute(
                "INSERT INTO task_groups (id, title, user_id, created_at, updated_at)
                 VALUES ('group-1', 'A', 'user-1', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z'),
                        ('group-2', 'B', 'user-1', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
                [],
            )
            .unwrap();
        let _ = conn
            .execute(
                "INSERT INTO tasks (id, title, group_id, user_id, created_at, updated_at)
                 VALUES ('task-1', 'one', 'group-1', 'user-1', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z'),
                        ('task-2', 'two', 'group-2', 'user-1', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        let _ = conn
            .execute("DELETE FROM task_groups WHERE id = 'group-1'", [])
            .unwrap();

        let remaining: Vec<String> = {
            let mut stmt = conn.prepare("SELECT id FROM tasks ORDER BY id").unwrap();
            stmt.query_map([], |row| row.get(0))
                .unwrap()
                .collect::<std::result::Result<Vec<_>, _>>()
                .unwrap()
        };
        assert_eq!(remaining, vec!["task-2".to_string()]);
    }

    #[test]
    fn review_session_pointer_is_unconstrained() {
        let conn = setup();
        insert_user(&conn, "user-1");

        // A review may reference a session that was never migrated in.
        let _ = conn
            .execute(
                "INSERT INTO reviews (id, user_id, title, type, session_id, created_at, updated_at)
                 VALUES ('review-1', 'user-1', 'Reflection', 'session', 'session-gone',
                         '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        let session_id: Option<String> = conn
            .query_row(
                "SELECT session_id FROM reviews WHERE id = 'review-1'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(session_id.as_deref(), Some("session-gone"));
    }

    #[test]
    fn order_columns_default_to_zero() {
        let conn = setup();
        insert_user(&conn, "user-1");
        let _ = conn
            .execute(
                "INSERT INTO task_groups (id, title, user_id, created_at, updated_at)
                 VALUES ('group-1', 'Inbox', 'user-1', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
                [],
            )
            .unwrap();
        let order: i64 = conn
            .query_row(
                "SELECT \"order\" FROM task_groups WHERE id = 'group-1'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(order, 0);
    }

    #[test]
    fn duplicate_username_rejected() {
        let conn = setup();
        insert_user(&conn, "moose");
        let result = conn.execute(
            "INSERT INTO users (id, username, email, created_at, updated_at)
             VALUES ('user-2', 'moose', 'other@example.com', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
            [],
        );
        assert!(result.is_err());
    }
}
