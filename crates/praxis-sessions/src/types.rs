//! Work session types.

use serde::{Deserialize, Serialize};

/// A planned block of focused work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub title: String,
    pub important_action: String,
    pub smart_goals: String,
    pub metastrategic_thinking: String,
    pub murphyjitsu: Option<String>,
    pub user_id: String,
    pub is_completed: bool,
    pub started_at: String,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for starting a session. `startedAt` defaults to the moment of
/// creation when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub title: String,
    pub important_action: String,
    pub smart_goals: String,
    pub metastrategic_thinking: String,
    #[serde(default)]
    pub murphyjitsu: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
}

/// Partial update for a session.
///
/// `murphyjitsu` and `completed_at` are doubly optional: absent means
/// leave alone, explicit `null` clears the value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSession {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub important_action: Option<String>,
    #[serde(default)]
    pub smart_goals: Option<String>,
    #[serde(default)]
    pub metastrategic_thinking: Option<String>,
    #[serde(default)]
    pub murphyjitsu: Option<Option<String>>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub completed_at: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_serializes_camel_case() {
        let session = Session {
            id: "session-1".to_string(),
            title: "Deep work".to_string(),
            important_action: "Finish the draft".to_string(),
            smart_goals: "One chapter by noon".to_string(),
            metastrategic_thinking: "Close the browser".to_string(),
            murphyjitsu: None,
            user_id: "user-1".to_string(),
            is_completed: false,
            started_at: "2026-01-01T09:00:00Z".to_string(),
            completed_at: None,
            created_at: "2026-01-01T09:00:00Z".to_string(),
            updated_at: "2026-01-01T09:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["importantAction"], "Finish the draft");
        assert_eq!(json["isCompleted"], false);
        assert_eq!(json["completedAt"], serde_json::Value::Null);
    }

    #[test]
    fn update_distinguishes_absent_from_null_completed_at() {
        let absent: UpdateSession = serde_json::from_str(r#"{"isCompleted":true}"#).unwrap();
        assert_eq!(absent.completed_at, None);

        let cleared: UpdateSession =
            serde_json::from_str(r#"{"isCompleted":false,"completedAt":null}"#).unwrap();
        assert_eq!(cleared.completed_at, Some(None));
    }
}
