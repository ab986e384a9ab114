//! The settings schema and its defaults.

use serde::{Deserialize, Serialize};

/// Default bearer-token secret. Fine for local development; the server
/// warns loudly when it is still in use.
pub const DEV_TOKEN_SECRET: &str = "praxis-dev-secret";

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Interface the HTTP listener binds to.
    pub host: String,
    /// Port the HTTP listener binds to.
    pub port: u16,
    /// SQLite database file.
    pub db_path: String,
    /// HMAC secret for bearer tokens.
    pub token_secret: String,
    /// Bearer token lifetime in hours.
    pub token_ttl_hours: i64,
    /// Default log filter, overridable by `RUST_LOG`.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4400,
            db_path: "praxis.db".to_string(),
            token_secret: DEV_TOKEN_SECRET.to_string(),
            token_ttl_hours: 24 * 7,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Whether the secret was never changed from the development default.
    #[must_use]
    pub fn uses_dev_secret(&self) -> bool {
        self.token_secret == DEV_TOKEN_SECRET
    }
}
