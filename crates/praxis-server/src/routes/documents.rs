//! Document endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use praxis_core::FieldErrors;
use praxis_docs::repository;
use praxis_docs::{DocError, Document, NewDocument, UpdateDocument};

use crate::auth::AuthUser;
use crate::errors::{ApiError, ApiResult};
use crate::routes::parse_body;
use crate::state::AppState;

/// GET /api/documents
pub(crate) async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Document>>> {
    let conn = state.conn()?;
    Ok(Json(repository::documents_for_user(&conn, &caller.id)?))
}

/// GET /api/documents/category/:category
pub(crate) async fn by_category(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(category): Path<String>,
) -> ApiResult<Json<Vec<Document>>> {
    let conn = state.conn()?;
    Ok(Json(repository::documents_by_category(
        &conn, &caller.id, &category,
    )?))
}

/// GET /api/documents/:id
pub(crate) async fn get_one(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Document>> {
    let conn = state.conn()?;
    let doc = repository::document_by_id(&conn, &caller.id, &id)?
        .ok_or(DocError::DocumentNotFound)?;
    Ok(Json(doc))
}

/// POST /api/documents
pub(crate) async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    let new: NewDocument = parse_body(body, "Invalid document data")?;

    let mut errors = FieldErrors::new();
    errors.require("title", "Title", &new.title);
    errors
        .into_result()
        .map_err(|errors| ApiError::validation("Invalid document data", errors))?;

    let conn = state.conn()?;
    let doc = repository::create_document(&conn, &caller.id, &new)?;
    Ok((StatusCode::CREATED, Json(doc)))
}

/// PUT /api/documents/:id
pub(crate) async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Document>> {
    let update: UpdateDocument = parse_body(body, "Invalid document data")?;
    let conn = state.conn()?;
    let doc = repository::update_document(&conn, &caller.id, &id, &update)?
        .ok_or(DocError::DocumentNotFound)?;
    Ok(Json(doc))
}

/// DELETE /api/documents/:id
pub(crate) async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let conn = state.conn()?;
    if !repository::delete_document(&conn, &caller.id, &id)? {
        return Err(DocError::DocumentNotFound.into());
    }
    Ok(StatusCode::NO_CONTENT)
}
