//! Route table and shared handler plumbing.

mod accounts;
mod documents;
mod groups;
mod reviews;
mod sessions;
mod tasks;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};
use serde::de::DeserializeOwned;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::errors::{ApiError, ApiResult};
use crate::health;
use crate::state::AppState;

/// Parses a JSON body into `T`, reporting failures under the endpoint's
/// validation message rather than a bare deserialization error.
pub(crate) fn parse_body<T: DeserializeOwned>(
    body: serde_json::Value,
    message: &str,
) -> ApiResult<T> {
    serde_json::from_value(body).map_err(|e| {
        let mut errors = praxis_core::FieldErrors::new();
        errors.push("body", e.to_string());
        ApiError::validation(message, errors)
    })
}

/// Builds the full route table around `state`.
///
/// `/health`, register and login are public; every other route runs
/// behind the bearer middleware. Unknown paths 404 without touching auth.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/register", post(accounts::register))
        .route("/api/login", post(accounts::login));

    let protected = Router::new()
        .route("/api/user", get(accounts::current_user))
        .route("/api/task-groups", get(groups::list).post(groups::create))
        .route("/api/task-groups/reorder", post(groups::reorder))
        .route(
            "/api/task-groups/{id}",
            put(groups::update).delete(groups::remove),
        )
        .route("/api/task-groups/{id}/tasks", get(groups::tasks_in_group))
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        .route("/api/tasks/reorder", post(tasks::reorder))
        .route("/api/tasks/{id}", put(tasks::update).delete(tasks::remove))
        .route("/api/sessions", get(sessions::list).post(sessions::create))
        .route(
            "/api/sessions/{id}",
            get(sessions::get_one)
                .put(sessions::update)
                .delete(sessions::remove),
        )
        .route("/api/sessions/{id}/reviews", get(sessions::session_reviews))
        .route(
            "/api/sessions/{id}/reflection",
            post(sessions::create_reflection),
        )
        .route("/api/reviews", get(reviews::list).post(reviews::create))
        .route(
            "/api/reviews/{id}",
            get(reviews::get_one)
                .put(reviews::update)
                .delete(reviews::remove),
        )
        .route(
            "/api/documents",
            get(documents::list).post(documents::create),
        )
        .route(
            "/api/documents/category/{category}",
            get(documents::by_category),
        )
        .route(
            "/api/documents/{id}",
            get(documents::get_one)
                .put(documents::update)
                .delete(documents::remove),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    public
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
