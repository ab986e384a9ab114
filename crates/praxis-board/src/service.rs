//! Applies reorder plans to the database.
//!
//! Plans are validated against the current container contents before any
//! write happens; a bad index or unknown group leaves the board untouched.
//! The writes themselves are applied one item at a time rather than in a
//! transaction, matching how the board client persists each position.

use rusqlite::Connection;

use crate::errors::{BoardError, Result};
use crate::reorder::{self, OrderUpdate};
use crate::repository;
use crate::types::{Task, TaskGroup, UpdateTask, UpdateTaskGroup};

fn apply_group_updates(conn: &Connection, user_id: &str, plan: &[OrderUpdate]) -> Result<()> {
    for update in plan {
        let applied = repository::update_group(
            conn,
            user_id,
            &update.id,
            &UpdateTaskGroup {
                order: Some(update.order),
                ..UpdateTaskGroup::default()
            },
        )?;
        if applied.is_none() {
            tracing::warn!(group_id = %update.id, "group vanished during reorder");
        }
    }
    Ok(())
}

fn apply_task_updates(conn: &Connection, user_id: &str, plan: &[OrderUpdate]) -> Result<()> {
    for update in plan {
        let applied = repository::update_task(
            conn,
            user_id,
            &update.id,
            &UpdateTask {
                order: Some(update.order),
                group_id: update.new_group.clone().map(Some),
                ..UpdateTask::default()
            },
        )?;
        if applied.is_none() {
            tracing::warn!(task_id = %update.id, "task vanished during reorder");
        }
    }
    Ok(())
}

/// Moves a group from `source_index` to `dest_index` on the user's board
/// and returns the refreshed group list.
pub fn reorder_groups(
    conn: &Connection,
    user_id: &str,
    source_index: usize,
    dest_index: usize,
) -> Result<Vec<TaskGroup>> {
    let groups = repository::groups_for_user(conn, user_id)?;
    let ids: Vec<String> = groups.into_iter().map(|g| g.id).collect();
    let plan = reorder::plan_group_reorder(&ids, source_index, dest_index)?;
    apply_group_updates(conn, user_id, &plan)?;
    tracing::debug!(
        user_id,
        source_index,
        dest_index,
        updates = plan.len(),
        "reordered groups"
    );
    repository::groups_for_user(conn, user_id)
}

/// Moves a task between positions, possibly across groups, and returns the
/// user's refreshed task list.
///
/// Both groups must belong to the user; indexes outside the current
/// container contents are rejected before anything is written.
pub fn reorder_tasks(
    conn: &Connection,
    user_id: &str,
    source_group_id: &str,
    source_index: usize,
    dest_group_id: &str,
    dest_index: usize,
) -> Result<Vec<Task>> {
    if repository::group_by_id(conn, user_id, source_group_id)?.is_none() {
        return Err(BoardError::GroupNotFound);
    }
    let same_group = source_group_id == dest_group_id;
    if !same_group && repository::group_by_id(conn, user_id, dest_group_id)?.is_none() {
        return Err(BoardError::GroupNotFound);
    }

    let source_ids: Vec<String> = repository::tasks_in_group(conn, user_id, source_group_id)?
        .into_iter()
        .map(|t| t.id)
        .collect();

    let plan = if same_group {
        reorder::plan_task_reorder(&source_ids, source_index, dest_index)?
    } else {
        let dest_ids: Vec<String> = repository::tasks_in_group(conn, user_id, dest_group_id)?
            .into_iter()
            .map(|t| t.id)
            .collect();
        reorder::plan_task_move(&source_ids, &dest_ids, source_index, dest_index, dest_group_id)?
    };

    apply_task_updates(conn, user_id, &plan)?;
    tracing::debug!(
        user_id,
        source_group_id,
        dest_group_id,
        updates = plan.len(),
        "reordered tasks"
    );
    repository::tasks_for_user(conn, user_id)
}
