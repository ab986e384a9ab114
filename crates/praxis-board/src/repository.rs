//! Board rows in SQLite.
//!
//! All queries are scoped by `user_id`, so a row belonging to another user
//! is indistinguishable from a missing row.

use praxis_core::{generate_id, now_iso};
use rusqlite::types::ToSql;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::errors::{BoardError, Result};
use crate::types::{NewTask, NewTaskGroup, Priority, Task, TaskGroup, UpdateTask, UpdateTaskGroup};

const DEFAULT_GROUP_COLOR: &str = "#2563EB";

const GROUP_COLUMNS: &str = "id, title, color, user_id, \"order\", created_at, updated_at";
const TASK_COLUMNS: &str = "id, title, completed, description, group_id, user_id, \"order\", \
                            due_date, priority, created_at, updated_at";

fn row_to_group(row: &Row<'_>) -> rusqlite::Result<TaskGroup> {
    Ok(TaskGroup {
        id: row.get(0)?,
        title: row.get(1)?,
        color: row.get(2)?,
        user_id: row.get(3)?,
        order: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let priority_raw: String = row.get(8)?;
    let priority = Priority::parse(&priority_raw).unwrap_or_else(|| {
        tracing::warn!(value = %priority_raw, "unknown priority in database, using medium");
        Priority::Medium
    });
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        completed: row.get(2)?,
        description: row.get(3)?,
        group_id: row.get(4)?,
        user_id: row.get(5)?,
        order: row.get(6)?,
        due_date: row.get(7)?,
        priority,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

// ─── Task groups ─────────────────────────────────────────────────────────

/// Creates a group, appending it to the board unless the payload names a
/// position.
pub fn create_group(conn: &Connection, user_id: &str, new: &NewTaskGroup) -> Result<TaskGroup> {
    let order: i64 = match new.order {
        Some(order) => order,
        None => conn.query_row(
            "SELECT COALESCE(MAX(\"order\") + 1, 0) FROM task_groups WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?,
    };
    let group = TaskGroup {
        id: generate_id("group"),
        title: new.title.clone(),
        color: new
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_GROUP_COLOR.to_string()),
        user_id: user_id.to_string(),
        order,
        created_at: now_iso(),
        updated_at: now_iso(),
    };
    let _ = conn.execute(
        "INSERT INTO task_groups (id, title, color, user_id, \"order\", created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            group.id,
            group.title,
            group.color,
            group.user_id,
            group.order,
            group.created_at,
            group.updated_at,
        ],
    )?;
    Ok(group)
}

/// All of a user's groups in board order.
pub fn groups_for_user(conn: &Connection, user_id: &str) -> Result<Vec<TaskGroup>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GROUP_COLUMNS} FROM task_groups WHERE user_id = ?1 ORDER BY \"order\", created_at"
    ))?;
    let groups = stmt
        .query_map([user_id], row_to_group)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(groups)
}

/// Fetches one group, scoped to its owner.
pub fn group_by_id(conn: &Connection, user_id: &str, id: &str) -> Result<Option<TaskGroup>> {
    let group = conn
        .query_row(
            &format!("SELECT {GROUP_COLUMNS} FROM task_groups WHERE id = ?1 AND user_id = ?2"),
            [id, user_id],
            row_to_group,
        )
        .optional()?;
    Ok(group)
}

/// Applies the provided fields to a group. Returns `None` when the group
/// does not exist for this user.
pub fn update_group(
    conn: &Connection,
    user_id: &str,
    id: &str,
    update: &UpdateTaskGroup,
) -> Result<Option<TaskGroup>> {
    let mut sets: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(title) = &update.title {
        sets.push(format!("title = ?{}", values.len() + 1));
        values.push(Box::new(title.clone()));
    }
    if let Some(color) = &update.color {
        sets.push(format!("color = ?{}", values.len() + 1));
        values.push(Box::new(color.clone()));
    }
    if let Some(order) = update.order {
        sets.push(format!("\"order\" = ?{}", values.len() + 1));
        values.push(Box::new(order));
    }
    sets.push(format!("updated_at = ?{}", values.len() + 1));
    values.push(Box::new(now_iso()));

    let sql = format!(
        "UPDATE task_groups SET {} WHERE id = ?{} AND user_id = ?{}",
        sets.join(", "),
        values.len() + 1,
        values.len() + 2,
    );
    values.push(Box::new(id.to_string()));
    values.push(Box::new(user_id.to_string()));

    let refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
    let changed = conn.execute(&sql, refs.as_slice())?;
    if changed == 0 {
        return Ok(None);
    }
    group_by_id(conn, user_id, id)
}

/// Deletes a group; its tasks go with it via the schema's cascade.
pub fn delete_group(conn: &Connection, user_id: &str, id: &str) -> Result<bool> {
    let changed = conn.execute(
        "DELETE FROM task_groups WHERE id = ?1 AND user_id = ?2",
        [id, user_id],
    )?;
    Ok(changed > 0)
}

// ─── Tasks ───────────────────────────────────────────────────────────────

/// Creates a task at the end of its group (or of the ungrouped backlog)
/// unless the payload names a position.
///
/// Fails fast when the named group does not exist for this user.
pub fn create_task(conn: &Connection, user_id: &str, new: &NewTask) -> Result<Task> {
    if let Some(group_id) = &new.group_id {
        if group_by_id(conn, user_id, group_id)?.is_none() {
            return Err(BoardError::GroupNotFound);
        }
    }
    let order: i64 = match new.order {
        Some(order) => order,
        None => conn.query_row(
            "SELECT COALESCE(MAX(\"order\") + 1, 0) FROM tasks WHERE user_id = ?1 AND group_id IS ?2",
            params![user_id, new.group_id],
            |row| row.get(0),
        )?,
    };
    let task = Task {
        id: generate_id("task"),
        title: new.title.clone(),
        completed: new.completed.unwrap_or(false),
        description: new.description.clone().unwrap_or_default(),
        group_id: new.group_id.clone(),
        user_id: user_id.to_string(),
        order,
        due_date: new.due_date.clone(),
        priority: new.priority.unwrap_or(Priority::Medium),
        created_at: now_iso(),
        updated_at: now_iso(),
    };
    let _ = conn.execute(
        "INSERT INTO tasks (id, title, completed, description, group_id, user_id, \"order\",
                            due_date, priority, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            task.id,
            task.title,
            task.completed,
            task.description,
            task.group_id,
            task.user_id,
            task.order,
            task.due_date,
            task.priority.as_sql(),
            task.created_at,
            task.updated_at,
        ],
    )?;
    Ok(task)
}

/// All of a user's tasks, grouped then ordered.
pub fn tasks_for_user(conn: &Connection, user_id: &str) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1
         ORDER BY group_id, \"order\", created_at"
    ))?;
    let tasks = stmt
        .query_map([user_id], row_to_task)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tasks)
}

/// Tasks within one group, in board order.
pub fn tasks_in_group(conn: &Connection, user_id: &str, group_id: &str) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 AND group_id = ?2
         ORDER BY \"order\", created_at"
    ))?;
    let tasks = stmt
        .query_map([user_id, group_id], row_to_task)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tasks)
}

/// Fetches one task, scoped to its owner.
pub fn task_by_id(conn: &Connection, user_id: &str, id: &str) -> Result<Option<Task>> {
    let task = conn
        .query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1 AND user_id = ?2"),
            [id, user_id],
            row_to_task,
        )
        .optional()?;
    Ok(task)
}

/// Applies the provided fields to a task. Returns `None` when the task
/// does not exist for this user.
pub fn update_task(
    conn: &Connection,
    user_id: &str,
    id: &str,
    update: &UpdateTask,
) -> Result<Option<Task>> {
    if let Some(Some(group_id)) = &update.group_id {
        if group_by_id(conn, user_id, group_id)?.is_none() {
            return Err(BoardError::GroupNotFound);
        }
    }

    let mut sets: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(title) = &update.title {
        sets.push(format!("title = ?{}", values.len() + 1));
        values.push(Box::new(title.clone()));
    }
    if let Some(description) = &update.description {
        sets.push(format!("description = ?{}", values.len() + 1));
        values.push(Box::new(description.clone()));
    }
    if let Some(completed) = update.completed {
        sets.push(format!("completed = ?{}", values.len() + 1));
        values.push(Box::new(completed));
    }
    if let Some(group_id) = &update.group_id {
        sets.push(format!("group_id = ?{}", values.len() + 1));
        values.push(Box::new(group_id.clone()));
    }
    if let Some(order) = update.order {
        sets.push(format!("\"order\" = ?{}", values.len() + 1));
        values.push(Box::new(order));
    }
    if let Some(due_date) = &update.due_date {
        sets.push(format!("due_date = ?{}", values.len() + 1));
        values.push(Box::new(due_date.clone()));
    }
    if let Some(priority) = update.priority {
        sets.push(format!("priority = ?{}", values.len() + 1));
        values.push(Box::new(priority.as_sql().to_string()));
    }
    sets.push(format!("updated_at = ?{}", values.len() + 1));
    values.push(Box::new(now_iso()));

    let sql = format!(
        "UPDATE tasks SET {} WHERE id = ?{} AND user_id = ?{}",
        sets.join(", "),
        values.len() + 1,
        values.len() + 2,
    );
    values.push(Box::new(id.to_string()));
    values.push(Box::new(user_id.to_string()));

    let refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
    let changed = conn.execute(&sql, refs.as_slice())?;
    if changed == 0 {
        return Ok(None);
    }
    task_by_id(conn, user_id, id)
}

/// Deletes a task.
pub fn delete_task(conn: &Connection, user_id: &str, id: &str) -> Result<bool> {
    let changed = conn.execute(
        "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
        [id, user_id],
    )?;
    Ok(changed > 0)
}
