//! Work sessions: planned blocks of focused work.
//!
//! A session captures its plan up front (the important action, SMART
//! goals, metastrategic thinking, optional murphyjitsu) and tracks
//! completion. Completion timestamps are managed in [`service`]: flipping
//! `isCompleted` stamps or clears `completedAt` automatically.

#![deny(unsafe_code)]

pub mod errors;
pub mod repository;
pub mod service;
pub mod types;

pub use errors::{Result, SessionError};
pub use types::{NewSession, Session, UpdateSession};
