//! Shared state accessible from Axum handlers.

use std::sync::Arc;
use std::time::Instant;

use praxis_reviews::ReviewStore;
use praxis_settings::Settings;
use praxis_store::{ConnectionPool, PooledConnection};

use crate::errors::ApiResult;

/// Everything handlers need, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    /// Resolved server settings.
    pub settings: Settings,
    /// SQLite connection pool for the row-backed repositories.
    pub pool: ConnectionPool,
    /// Review storage; the backend is injected at startup.
    pub reviews: Arc<dyn ReviewStore>,
    /// When the server started, for the health uptime counter.
    pub start_time: Instant,
}

impl AppState {
    /// Assembles state from its parts.
    #[must_use]
    pub fn new(settings: Settings, pool: ConnectionPool, reviews: Arc<dyn ReviewStore>) -> Self {
        Self {
            settings,
            pool,
            reviews,
            start_time: Instant::now(),
        }
    }

    /// Checks a connection out of the pool.
    pub fn conn(&self) -> ApiResult<PooledConnection> {
        Ok(self.pool.get()?)
    }
}
