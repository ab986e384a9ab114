//! # praxis-core
//!
//! Shared primitives for the praxis workspace: entity id generation,
//! timestamp formatting, and the per-field validation collector used at
//! the request boundary.

#![deny(unsafe_code)]

pub mod ids;
pub mod time;
pub mod validate;

pub use ids::generate_id;
pub use time::now_iso;
pub use validate::FieldErrors;
