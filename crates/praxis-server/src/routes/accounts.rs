//! Registration, login, and the current-user endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use praxis_auth::{NewUser, User, password, repository, token};
use praxis_core::FieldErrors;
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::errors::{ApiError, ApiResult};
use crate::routes::parse_body;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// A user plus their bearer token, returned from register and login.
#[derive(Debug, Serialize)]
pub(crate) struct AuthResponse {
    user: User,
    token: String,
}

fn validate_register(req: &RegisterRequest) -> ApiResult<()> {
    let mut errors = FieldErrors::new();
    errors.require("username", "Username", &req.username);
    errors.require("email", "Email", &req.email);
    errors.require("password", "Password", &req.password);
    if !req.email.trim().is_empty() && !req.email.contains('@') {
        errors.push("email", "Email is invalid");
    }
    errors
        .into_result()
        .map_err(|errors| ApiError::validation("Invalid registration data", errors))
}

/// Seeds the built-in documents, logging instead of failing the login.
fn seed_documents(state: &AppState, user_id: &str) {
    match state.conn() {
        Ok(conn) => {
            if let Err(e) = praxis_docs::seed::seed_user_documents(&conn, user_id) {
                tracing::warn!(user_id, error = %e, "document seeding failed");
            }
        }
        Err(e) => tracing::warn!(user_id, error = %e, "document seeding skipped"),
    }
}

/// POST /api/register
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let req: RegisterRequest = parse_body(body, "Invalid registration data")?;
    validate_register(&req)?;

    let display_name = req
        .display_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| req.username.clone());

    let conn = state.conn()?;
    let user = repository::create_user(
        &conn,
        &NewUser {
            username: req.username,
            email: req.email,
            password_hash: Some(password::hash_password(&req.password)),
            display_name: Some(display_name),
        },
    )?;
    drop(conn);
    seed_documents(&state, &user.id);

    let token = token::issue(
        &state.settings.token_secret,
        &user.id,
        state.settings.token_ttl_hours,
    )?;
    tracing::info!(user_id = %user.id, "account registered");
    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

/// POST /api/login
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<AuthResponse>> {
    let req: LoginRequest = parse_body(body, "Invalid login data")?;

    let conn = state.conn()?;
    let user = repository::user_by_username(&conn, &req.username)?
        .ok_or(praxis_auth::AuthError::InvalidCredentials)?;
    drop(conn);

    // Accounts provisioned by an external provider have no local password.
    let stored = user
        .password
        .as_deref()
        .ok_or(praxis_auth::AuthError::InvalidCredentials)?;
    if !password::verify_password(&req.password, stored) {
        return Err(praxis_auth::AuthError::InvalidCredentials.into());
    }

    seed_documents(&state, &user.id);
    let token = token::issue(
        &state.settings.token_secret,
        &user.id,
        state.settings.token_ttl_hours,
    )?;
    Ok(Json(AuthResponse { user, token }))
}

/// GET /api/user
pub(crate) async fn current_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<Json<User>> {
    let conn = state.conn()?;
    let user = repository::user_by_id(&conn, &caller.id)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(user))
}
