//! Pure planning for drag-and-drop position changes.
//!
//! Each planner takes the current ordering of the affected containers and
//! returns the list of per-item position writes needed to realize the
//! move. Nothing here touches the database; [`crate::service`] applies the
//! plan through the repository, one update per item, the same way a board
//! client persists a drag.
//!
//! Out-of-range indexes are rejected outright. A stale client view is a
//! real conflict and clamping would hide it.

use crate::errors::{BoardError, Result};

/// One position write produced by a planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderUpdate {
    /// Item to update.
    pub id: String,
    /// New 0-based position within its (possibly new) container.
    pub order: i64,
    /// Set when the item changes container: the destination group id.
    pub new_group: Option<String>,
}

// Board sizes never approach i64 range.
fn to_order(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

fn check_bounds(index: usize, len: usize, what: &str, noun: &str) -> Result<()> {
    if index >= len {
        return Err(BoardError::InvalidPosition {
            message: format!("{what} index {index} out of bounds for {len} {noun}"),
        });
    }
    Ok(())
}

fn reorder_within(ids: &[String], source_index: usize, dest_index: usize, noun: &str) -> Result<Vec<OrderUpdate>> {
    check_bounds(source_index, ids.len(), "source", noun)?;
    check_bounds(dest_index, ids.len(), "destination", noun)?;
    if source_index == dest_index {
        return Ok(Vec::new());
    }

    let mut reordered: Vec<&String> = ids.iter().collect();
    let moved = reordered.remove(source_index);
    reordered.insert(dest_index, moved);

    Ok(reordered
        .into_iter()
        .enumerate()
        .map(|(index, id)| OrderUpdate {
            id: id.clone(),
            order: to_order(index),
            new_group: None,
        })
        .collect())
}

/// Plans moving a group from `source_index` to `dest_index` within the
/// owner's ordered group list. Every group is renumbered to its new
/// 0-based position.
pub fn plan_group_reorder(
    group_ids: &[String],
    source_index: usize,
    dest_index: usize,
) -> Result<Vec<OrderUpdate>> {
    reorder_within(group_ids, source_index, dest_index, "groups")
}

/// Plans moving a task within a single group. Every task in the group is
/// renumbered to its new 0-based position.
pub fn plan_task_reorder(
    task_ids: &[String],
    source_index: usize,
    dest_index: usize,
) -> Result<Vec<OrderUpdate>> {
    reorder_within(task_ids, source_index, dest_index, "tasks")
}

/// Plans moving a task between two different groups.
///
/// The moved task's update carries the destination group id and its new
/// position. Both groups come out densely renumbered: the source closes
/// the gap the task left, and the destination is renumbered around the
/// insertion point. `dest_index` may equal the destination length to
/// append.
pub fn plan_task_move(
    source_ids: &[String],
    dest_ids: &[String],
    source_index: usize,
    dest_index: usize,
    dest_group_id: &str,
) -> Result<Vec<OrderUpdate>> {
    check_bounds(source_index, source_ids.len(), "source", "tasks")?;
    if dest_index > dest_ids.len() {
        return Err(BoardError::InvalidPosition {
            message: format!(
                "destination index {dest_index} out of bounds for {} tasks",
                dest_ids.len()
            ),
        });
    }

    let moved = &source_ids[source_index];
    let mut updates = vec![OrderUpdate {
        id: moved.clone(),
        order: to_order(dest_index),
        new_group: Some(dest_group_id.to_string()),
    }];

    // Close the gap in the source group.
    updates.extend(
        source_ids
            .iter()
            .filter(|id| *id != moved)
            .enumerate()
            .map(|(index, id)| OrderUpdate {
                id: id.clone(),
                order: to_order(index),
                new_group: None,
            }),
    );

    // Renumber the destination around the insertion point.
    let mut dest_after: Vec<&String> = dest_ids.iter().collect();
    dest_after.insert(dest_index, moved);
    updates.extend(
        dest_after
            .into_iter()
            .enumerate()
            .filter(|(_, id)| *id != moved)
            .map(|(index, id)| OrderUpdate {
                id: id.clone(),
                order: to_order(index),
                new_group: None,
            }),
    );

    Ok(updates)
}
