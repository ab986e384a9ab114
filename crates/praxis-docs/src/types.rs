//! Document types.

use serde::{Deserialize, Serialize};

/// A rich-text document. `content` is the editor's JSON document tree,
/// stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: serde_json::Value,
    pub category: String,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating a document. Content defaults to an empty object,
/// category to `"default"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub title: String,
    #[serde(default)]
    pub content: Option<serde_json::Value>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Partial update for a document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocument {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<serde_json::Value>,
    #[serde(default)]
    pub category: Option<String>,
}
