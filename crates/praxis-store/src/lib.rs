//! SQLite storage layer: connection pooling and schema migrations.
//!
//! Every other crate that touches the database goes through this one. It
//! owns the pool configuration (WAL, busy timeout, foreign keys) and the
//! versioned migration set that creates the schema. Domain crates receive
//! plain [`rusqlite::Connection`] references and stay oblivious to pooling.

#![deny(unsafe_code)]

pub mod errors;
pub mod migrations;
pub mod pool;

pub use errors::{Result, StoreError};
pub use migrations::{current_version, latest_version, run_migrations};
pub use pool::{ConnectionConfig, ConnectionPool, PooledConnection};
