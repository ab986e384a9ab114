//! Review types.

use serde::{Deserialize, Serialize};

/// What cadence or occasion a review covers. Stored lowercase in SQLite
/// and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Experiential,
    Session,
}

impl ReviewType {
    /// Text stored in the `type` column.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Experiential => "experiential",
            Self::Session => "session",
        }
    }

    /// Parses the stored form. Unknown values map to `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            "experiential" => Some(Self::Experiential),
            "session" => Some(Self::Session),
            _ => None,
        }
    }
}

/// A stored review. `preview` holds the review body or, for session
/// reflections, the encoded labeled-section summary from [`crate::codec`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub preview: String,
    #[serde(rename = "type")]
    pub review_type: ReviewType,
    pub session_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating a review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub title: String,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(rename = "type")]
    pub review_type: ReviewType,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Partial update for a review. `session_id` is doubly optional: absent
/// means leave alone, explicit `null` breaks the session link.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReview {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(rename = "type", default)]
    pub review_type: Option<ReviewType>,
    #[serde(default)]
    pub session_id: Option<Option<String>>,
}
