//! Document rows in SQLite.

use praxis_core::{generate_id, now_iso};
use rusqlite::types::ToSql;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::errors::Result;
use crate::types::{Document, NewDocument, UpdateDocument};

const DOC_COLUMNS: &str = "id, title, content, category, user_id, created_at, updated_at";

fn row_to_document(row: &Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        category: row.get(3)?,
        user_id: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// Inserts a new document.
pub fn create_document(conn: &Connection, user_id: &str, new: &NewDocument) -> Result<Document> {
    let document = Document {
        id: generate_id("doc"),
        title: new.title.clone(),
        content: new
            .content
            .clone()
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
        category: new.category.clone().unwrap_or_else(|| "default".to_string()),
        user_id: user_id.to_string(),
        created_at: now_iso(),
        updated_at: now_iso(),
    };
    let _ = conn.execute(
        "INSERT INTO documents (id, title, content, category, user_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            document.id,
            document.title,
            document.content,
            document.category,
            document.user_id,
            document.created_at,
            document.updated_at,
        ],
    )?;
    Ok(document)
}

/// All of a user's documents.
pub fn documents_for_user(conn: &Connection, user_id: &str) -> Result<Vec<Document>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DOC_COLUMNS} FROM documents WHERE user_id = ?1 ORDER BY created_at, id"
    ))?;
    let documents = stmt
        .query_map([user_id], row_to_document)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(documents)
}

/// A user's documents within one category.
pub fn documents_by_category(
    conn: &Connection,
    user_id: &str,
    category: &str,
) -> Result<Vec<Document>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DOC_COLUMNS} FROM documents WHERE user_id = ?1 AND category = ?2
         ORDER BY created_at, id"
    ))?;
    let documents = stmt
        .query_map([user_id, category], row_to_document)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(documents)
}

/// Fetches one document, scoped to its owner.
pub fn document_by_id(conn: &Connection, user_id: &str, id: &str) -> Result<Option<Document>> {
    let document = conn
        .query_row(
            &format!("SELECT {DOC_COLUMNS} FROM documents WHERE id = ?1 AND user_id = ?2"),
            [id, user_id],
            row_to_document,
        )
        .optional()?;
    Ok(document)
}

/// Applies the provided fields to a document. Returns `None` when the
/// document does not exist for this user.
pub fn update_document(
    conn: &Connection,
    user_id: &str,
    id: &str,
    update: &UpdateDocument,
) -> Result<Option<Document>> {
    let mut sets: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(title) = &update.title {
        sets.push(format!("title = ?{}", values.len() + 1));
        values.push(Box::new(title.clone()));
    }
    if let Some(content) = &update.content {
        sets.push(format!("content = ?{}", values.len() + 1));
        values.push(Box::new(content.clone()));
    }
    if let Some(category) = &update.category {
        sets.push(format!("category = ?{}", values.len() + 1));
        values.push(Box::new(category.clone()));
    }
    sets.push(format!("updated_at = ?{}", values.len() + 1));
    values.push(Box::new(now_iso()));

    let sql = format!(
        "UPDATE documents SET {} WHERE id = ?{} AND user_id = ?{}",
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
    document_by_id(conn, user_id, id)
}

/// Deletes a document.
pub fn delete_document(conn: &Connection, user_id: &str, id: &str) -> Result<bool> {
    let changed = conn.execute(
        "DELETE FROM documents WHERE id = ?1 AND user_id = ?2",
        [id, user_id],
    )?;
    Ok(changed > 0)
}
