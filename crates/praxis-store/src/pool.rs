//! Connection pool construction and per-connection pragma setup.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::errors::Result;

/// Pool of SQLite connections shared across the server.
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// A single connection checked out of the pool.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Tunables applied when the pool is built.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// How long a connection waits on a locked database before erroring.
    pub busy_timeout_ms: u32,
    /// Page cache size per connection, in KiB.
    pub cache_size_kib: u32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            pool_size: 16,
            busy_timeout_ms: 30_000,
            cache_size_kib: 8192,
        }
    }
}

/// Applies pragmas to every connection as it joins the pool.
///
/// WAL mode allows concurrent readers during writes, and foreign keys are
/// enforced so `ON DELETE CASCADE` in the schema actually fires.
#[derive(Debug)]
struct PragmaCustomizer {
    busy_timeout_ms: u32,
    cache_size_kib: u32,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch(&format!(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = {};
             PRAGMA foreign_keys = ON;
             PRAGMA cache_size = -{};
             PRAGMA synchronous = NORMAL;",
            self.busy_timeout_ms, self.cache_size_kib
        ))
    }
}

/// Builds a pool backed by a database file, creating the file if needed.
pub fn new_file<P: AsRef<std::path::Path>>(
    path: P,
    config: &ConnectionConfig,
) -> Result<ConnectionPool> {
    let manager = SqliteConnectionManager::file(path);
    build(manager, config)
}

/// Builds a pool backed by an in-memory database (for testing).
///
/// Each pooled connection holds its own private database, so tests that
/// need data visible across connections should use [`new_file`] with a
/// temporary directory instead.
pub fn new_in_memory(config: &ConnectionConfig) -> Result<ConnectionPool> {
    let manager = SqliteConnectionManager::memory();
    build(manager, config)
}

fn build(manager: SqliteConnectionManager, config: &ConnectionConfig) -> Result<ConnectionPool> {
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .connection_customizer(Box::new(PragmaCustomizer {
            busy_timeout_ms: config.busy_timeout_ms,
            cache_size_kib: config.cache_size_kib,
        }))
        .build(manager)?;
    tracing::debug!(pool_size = config.pool_size, "connection pool ready");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pragma_value(conn: &Connection, name: &str) -> i64 {
        conn.query_row(&format!("PRAGMA {name}"), [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn in_memory_pool_applies_pragmas() {
        let pool = new_in_memory(&ConnectionConfig::default()).unwrap();
        let conn = pool.get().unwrap();
        assert_eq!(pragma_value(&conn, "foreign_keys"), 1);
        assert_eq!(pragma_value(&conn, "busy_timeout"), 30_000);
        assert_eq!(pragma_value(&conn, "cache_size"), -8192);
    }

    #[test]
    fn file_pool_uses_wal_mode() {
        let dir = tempfile::tempdir().unwrap();
        let pool = new_file(dir.path().join("praxis.db"), &ConnectionConfig::default()).unwrap();
        let conn = pool.get().unwrap();
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn file_pool_shares_data_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConnectionConfig {
            pool_size: 4,
            ..ConnectionConfig::default()
        };
        let pool = new_file(dir.path().join("praxis.db"), &config).unwrap();

        {
            let conn = pool.get().unwrap();
            conn.execute_batch("CREATE TABLE probe (id INTEGER PRIMARY KEY)")
                .unwrap();
            let _ = conn.execute("INSERT INTO probe (id) VALUES (1)", []).unwrap();
        }

        let conn = pool.get().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM probe", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn custom_pool_size_respected() {
        let config = ConnectionConfig {
            pool_size: 2,
            ..ConnectionConfig::default()
        };
        let pool = new_in_memory(&config).unwrap();
        assert_eq!(pool.max_size(), 2);
    }
}
