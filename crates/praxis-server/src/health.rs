//! `/health` endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::errors::ApiResult;
use crate::state::AppState;

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is running.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Number of registered accounts.
    pub users: i64,
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let conn = state.conn()?;
    let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        users,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_expected_fields() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            uptime_secs: 42,
            users: 3,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["uptime_secs"], 42);
        assert_eq!(json["users"], 3);
    }
}
