//! # praxis-server
//!
//! The Axum HTTP API.
//!
//! - Route table in [`routes`]: account, board, session, review, and
//!   document endpoints under `/api`, plus the public `/health`.
//! - Bearer-token middleware in [`auth`]; everything except `/health`,
//!   register, and login requires a verified token.
//! - One error envelope in [`errors`]; handlers return [`errors::ApiResult`]
//!   and every failure serializes as `{"message": ...}`.
//! - [`shutdown`] holds the cancellation token the binary ties to ctrl-c.

#![deny(unsafe_code)]

pub mod auth;
pub mod errors;
pub mod health;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use errors::{ApiError, ApiResult};
pub use routes::build_router;
pub use shutdown::ShutdownCoordinator;
pub use state::AppState;
