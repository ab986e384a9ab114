//! Work session endpoints, their reviews, and the end-of-session
//! reflection flow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use praxis_core::FieldErrors;
use praxis_reviews::{NewReview, Review, ReviewType, association, codec};
use praxis_sessions::{NewSession, Session, SessionError, UpdateSession};
use praxis_sessions::{repository, service};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::{ApiError, ApiResult};
use crate::routes::parse_body;
use crate::state::AppState;

fn validate_new_session(new: &NewSession) -> ApiResult<()> {
    let mut errors = FieldErrors::new();
    errors.require("title", "Title", &new.title);
    errors.require("importantAction", "Important action", &new.important_action);
    errors.require("smartGoals", "SMART goals", &new.smart_goals);
    errors.require(
        "metastrategicThinking",
        "Metastrategic thinking",
        &new.metastrategic_thinking,
    );
    errors
        .into_result()
        .map_err(|errors| ApiError::validation("Invalid session data", errors))
}

/// GET /api/sessions
pub(crate) async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Session>>> {
    let conn = state.conn()?;
    Ok(Json(repository::sessions_for_user(&conn, &caller.id)?))
}

/// GET /api/sessions/:id
pub(crate) async fn get_one(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Session>> {
    let conn = state.conn()?;
    let session = repository::session_by_id(&conn, &caller.id, &id)?
        .ok_or(SessionError::SessionNotFound)?;
    Ok(Json(session))
}

/// POST /api/sessions
pub(crate) async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<Session>)> {
    let new: NewSession = parse_body(body, "Invalid session data")?;
    validate_new_session(&new)?;

    let conn = state.conn()?;
    let session = repository::create_session(&conn, &caller.id, &new)?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// PUT /api/sessions/:id
pub(crate) async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Session>> {
    let update: UpdateSession = parse_body(body, "Invalid session data")?;
    let conn = state.conn()?;
    let session = service::apply_update(&conn, &caller.id, &id, &update)?
        .ok_or(SessionError::SessionNotFound)?;
    Ok(Json(session))
}

/// DELETE /api/sessions/:id
///
/// Deletes the session's associated reflections first, best-effort; a
/// failed cleanup is logged but never blocks the session delete.
pub(crate) async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let conn = state.conn()?;
    let session = repository::session_by_id(&conn, &caller.id, &id)?
        .ok_or(SessionError::SessionNotFound)?;

    match state.reviews.for_session(&caller.id, &session.id, &session.title) {
        Ok(reflections) => {
            for review in reflections {
                if let Err(e) = state.reviews.delete(&caller.id, &review.id) {
                    tracing::warn!(review_id = %review.id, error = %e, "reflection cleanup failed");
                }
            }
        }
        Err(e) => tracing::warn!(session_id = %id, error = %e, "reflection lookup failed"),
    }

    if !repository::delete_session(&conn, &caller.id, &id)? {
        return Err(SessionError::SessionNotFound.into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/sessions/:id/reviews
pub(crate) async fn session_reviews(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Review>>> {
    let conn = state.conn()?;
    let session = repository::session_by_id(&conn, &caller.id, &id)?
        .ok_or(SessionError::SessionNotFound)?;
    drop(conn);

    let reviews = state
        .reviews
        .for_session(&caller.id, &session.id, &session.title)?;
    Ok(Json(reviews))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ReflectionRequest {
    goals_achieved: String,
    metastrategic_reflection: String,
    extrapolate: String,
}

/// POST /api/sessions/:id/reflection
///
/// Encodes the three answers into a session-type review and marks the
/// session completed, stamping `completedAt`.
pub(crate) async fn create_reflection(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<Review>)> {
    let req: ReflectionRequest = parse_body(body, "Invalid reflection data")?;

    let conn = state.conn()?;
    let session = repository::session_by_id(&conn, &caller.id, &id)?
        .ok_or(SessionError::SessionNotFound)?;

    let reflection = codec::SessionReflection {
        goals_achieved: req.goals_achieved,
        metastrategic_reflection: req.metastrategic_reflection,
        extrapolate: req.extrapolate,
    };
    let review = state.reviews.create(
        &caller.id,
        &NewReview {
            title: association::reflection_title(&session.id, &session.title),
            preview: Some(codec::encode_preview(&reflection)),
            review_type: ReviewType::Session,
            session_id: Some(session.id.clone()),
        },
    )?;

    let completed = service::apply_update(
        &conn,
        &caller.id,
        &id,
        &UpdateSession {
            is_completed: Some(true),
            ..UpdateSession::default()
        },
    )?;
    if completed.is_none() {
        tracing::warn!(session_id = %id, "session vanished while storing its reflection");
    }

    Ok((StatusCode::CREATED, Json(review)))
}
