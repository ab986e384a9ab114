//! Bearer-token middleware.
//!
//! Protected routes sit behind [`require_auth`], which verifies the
//! `Authorization: Bearer <token>` header and stashes the caller's id in
//! request extensions as [`AuthUser`]. Handlers never see an unverified
//! request.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::errors::ApiError;
use crate::state::AppState;

/// The authenticated caller, inserted into request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The verified user id from the token's `sub` claim.
    pub id: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Rejects the request with 401 unless it carries a valid bearer token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let claims = bearer_token(req.headers())
        .and_then(|token| praxis_auth::token::verify(&state.settings.token_secret, token).ok());

    match claims {
        Some(claims) => {
            let _ = req.extensions_mut().insert(AuthUser { id: claims.sub });
            next.run(req).await
        }
        None => ApiError::unauthorized("Not authenticated").into_response(),
    }
}
