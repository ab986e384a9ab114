//! User account types.

use serde::{Deserialize, Serialize};

/// A registered account.
///
/// The password hash never serializes, so a `User` can be returned from
/// API handlers directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub provider: String,
    pub provider_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields required to create an account. The password arrives already
/// hashed; `None` marks an externally-provisioned account with no local
/// password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
}
