//! Board types: task groups, tasks, and their create/update payloads.

use serde::{Deserialize, Serialize};

/// A column on the board. `order` is the group's 0-based position among
/// the owner's groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroup {
    pub id: String,
    pub title: String,
    pub color: String,
    pub user_id: String,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Task urgency. Stored lowercase in SQLite and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Text stored in the `priority` column.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses the stored form. Unknown values map to `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A card on the board. `group_id` is `None` for tasks not placed in any
/// column; `order` is the task's 0-based position within its group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub description: String,
    pub group_id: Option<String>,
    pub user_id: String,
    pub order: i64,
    pub due_date: Option<String>,
    pub priority: Priority,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating a group. When `order` is omitted the group is
/// appended to the board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskGroup {
    pub title: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

/// Partial update for a group. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskGroup {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

/// Payload for creating a task. When `order` is omitted the task lands at
/// the end of its group.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Partial update for a task.
///
/// `group_id` and `due_date` are doubly optional: absent means leave
/// alone, explicit `null` clears the value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub group_id: Option<Option<String>>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub due_date: Option<Option<String>>,
    #[serde(default)]
    pub priority: Option<Priority>,
}
