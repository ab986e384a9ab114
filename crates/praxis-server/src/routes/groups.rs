//! Task group endpoints, including board-level reordering.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use praxis_board::{BoardError, NewTaskGroup, Task, TaskGroup, UpdateTaskGroup};
use praxis_board::{repository, service};
use praxis_core::FieldErrors;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::{ApiError, ApiResult};
use crate::routes::parse_body;
use crate::state::AppState;

/// GET /api/task-groups
pub(crate) async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<Json<Vec<TaskGroup>>> {
    let conn = state.conn()?;
    Ok(Json(repository::groups_for_user(&conn, &caller.id)?))
}

/// POST /api/task-groups
pub(crate) async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<TaskGroup>)> {
    let new: NewTaskGroup = parse_body(body, "Invalid task group data")?;

    let mut errors = FieldErrors::new();
    errors.require("title", "Title", &new.title);
    errors
        .into_result()
        .map_err(|errors| ApiError::validation("Invalid task group data", errors))?;

    let conn = state.conn()?;
    let group = repository::create_group(&conn, &caller.id, &new)?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// PUT /api/task-groups/:id
pub(crate) async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<TaskGroup>> {
    let update: UpdateTaskGroup = parse_body(body, "Invalid task group data")?;
    let conn = state.conn()?;
    let group = repository::update_group(&conn, &caller.id, &id, &update)?
        .ok_or(BoardError::GroupNotFound)?;
    Ok(Json(group))
}

/// DELETE /api/task-groups/:id
pub(crate) async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let conn = state.conn()?;
    if !repository::delete_group(&conn, &caller.id, &id)? {
        return Err(BoardError::GroupNotFound.into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/task-groups/:groupId/tasks
pub(crate) async fn tasks_in_group(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(group_id): Path<String>,
) -> ApiResult<Json<Vec<Task>>> {
    let conn = state.conn()?;
    if repository::group_by_id(&conn, &caller.id, &group_id)?.is_none() {
        return Err(BoardError::GroupNotFound.into());
    }
    Ok(Json(repository::tasks_in_group(&conn, &caller.id, &group_id)?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReorderGroupsRequest {
    source_index: usize,
    dest_index: usize,
}

/// POST /api/task-groups/reorder
pub(crate) async fn reorder(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Vec<TaskGroup>>> {
    let req: ReorderGroupsRequest = parse_body(body, "Invalid reorder data")?;
    let conn = state.conn()?;
    let groups = service::reorder_groups(&conn, &caller.id, req.source_index, req.dest_index)?;
    Ok(Json(groups))
}
