//! Account handling: password hashing, bearer tokens, and user lookups.
//!
//! Passwords are stored as `<hash>.<salt>` with both parts base64-encoded
//! and the hash derived via PBKDF2-HMAC-SHA256. Tokens are stateless HS256
//! JWTs carrying the user id in `sub`.

#![deny(unsafe_code)]

pub mod errors;
pub mod password;
pub mod repository;
pub mod token;
pub mod types;

pub use errors::{AuthError, Result};
pub use types::{NewUser, User};
