//! Reviews: periodic reflections and per-session write-ups.
//!
//! The interesting parts live in [`codec`] (the labeled-section preview
//! format used by session reflections) and [`association`] (resolving
//! which reviews belong to a work session, including the legacy
//! title-matching fallback). Storage is behind the [`store::ReviewStore`]
//! trait with in-memory and SQLite backends.

#![deny(unsafe_code)]

pub mod association;
pub mod codec;
pub mod errors;
pub mod store;
pub mod types;

pub use codec::SessionReflection;
pub use errors::{Result, ReviewError};
pub use store::{MemoryReviewStore, ReviewStore, SqliteReviewStore};
pub use types::{NewReview, Review, ReviewType, UpdateReview};
