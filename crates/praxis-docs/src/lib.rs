//! Rich-text documents.
//!
//! Documents hold editor JSON in a single column and are grouped by a
//! free-form `category` string. New accounts are seeded with the built-in
//! category documents in [`seed`].

#![deny(unsafe_code)]

pub mod errors;
pub mod repository;
pub mod seed;
pub mod types;

pub use errors::{DocError, Result};
pub use types::{Document, NewDocument, UpdateDocument};
