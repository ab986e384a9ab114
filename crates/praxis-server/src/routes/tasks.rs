//! Task endpoints, including same- and cross-group drag moves.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use praxis_board::{BoardError, NewTask, Task, UpdateTask};
use praxis_board::{repository, service};
use praxis_core::FieldErrors;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::{ApiError, ApiResult};
use crate::routes::parse_body;
use crate::state::AppState;

/// An unknown `groupId` on a task write is the caller's mistake, not a
/// missing resource: 400, before the generic not-found mapping applies.
fn map_task_write_error(err: BoardError) -> ApiError {
    match err {
        BoardError::GroupNotFound => ApiError::bad_request("Invalid task group"),
        other => other.into(),
    }
}

/// GET /api/tasks
pub(crate) async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Task>>> {
    let conn = state.conn()?;
    Ok(Json(repository::tasks_for_user(&conn, &caller.id)?))
}

/// POST /api/tasks
pub(crate) async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let new: NewTask = parse_body(body, "Invalid task data")?;

    let mut errors = FieldErrors::new();
    errors.require("title", "Title", &new.title);
    errors
        .into_result()
        .map_err(|errors| ApiError::validation("Invalid task data", errors))?;

    let conn = state.conn()?;
    let task =
        repository::create_task(&conn, &caller.id, &new).map_err(map_task_write_error)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/:id
pub(crate) async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Task>> {
    let update: UpdateTask = parse_body(body, "Invalid task data")?;
    let conn = state.conn()?;
    let task = repository::update_task(&conn, &caller.id, &id, &update)
        .map_err(map_task_write_error)?
        .ok_or(BoardError::TaskNotFound)?;
    Ok(Json(task))
}

/// DELETE /api/tasks/:id
pub(crate) async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let conn = state.conn()?;
    if !repository::delete_task(&conn, &caller.id, &id)? {
        return Err(BoardError::TaskNotFound.into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReorderTasksRequest {
    source_group_id: String,
    source_index: usize,
    dest_group_id: String,
    dest_index: usize,
}

/// POST /api/tasks/reorder
pub(crate) async fn reorder(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Vec<Task>>> {
    let req: ReorderTasksRequest = parse_body(body, "Invalid reorder data")?;
    let conn = state.conn()?;
    let tasks = service::reorder_tasks(
        &conn,
        &caller.id,
        &req.source_group_id,
        req.source_index,
        &req.dest_group_id,
        req.dest_index,
    )?;
    Ok(Json(tasks))
}
