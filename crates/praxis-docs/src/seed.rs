//! Built-in category documents for new accounts.
//!
//! Each fresh account gets one starter document per workspace category,
//! holding a minimal editor JSON skeleton (a heading plus a short
//! description). Seeding is idempotent: it checks for existing documents
//! and does nothing on a second call.

use rusqlite::Connection;
use serde_json::{json, Value};

use crate::errors::Result;
use crate::repository;
use crate::types::NewDocument;

struct SeedDoc {
    title: &'static str,
    category: &'static str,
    blurb: &'static str,
}

const SEED_DOCS: [SeedDoc; 10] = [
    SeedDoc {
        title: "AI Assistant",
        category: "ai_assistance",
        blurb: "This is your AI assistant workspace. Add your notes or commands here.",
    },
    SeedDoc {
        title: "Settings & Search",
        category: "settings_search",
        blurb: "Configure your settings and search preferences here.",
    },
    SeedDoc {
        title: "Collection Bucket",
        category: "collection_bucket",
        blurb: "Your ideas collection area. Gather thoughts before organizing them.",
    },
    SeedDoc {
        title: "AI Memory",
        category: "ai_memory",
        blurb: "Storage for AI generated content and conversations.",
    },
    SeedDoc {
        title: "Actionables",
        category: "actionables",
        blurb: "Tasks and items that require your attention and action.",
    },
    SeedDoc {
        title: "Non-Actionables",
        category: "non_actionables",
        blurb: "Information storage that doesn't require immediate action.",
    },
    SeedDoc {
        title: "Prioritization",
        category: "prioritization",
        blurb: "Organize and prioritize your tasks and projects.",
    },
    SeedDoc {
        title: "Reminders & Plans",
        category: "reminders_plans",
        blurb: "Time-based organization of tasks and events.",
    },
    SeedDoc {
        title: "Learning Dashboard",
        category: "learning_dashboard",
        blurb: "Track your learning progress and educational goals.",
    },
    SeedDoc {
        title: "Strategy Toolbox",
        category: "strategy_toolbox",
        blurb: "Strategic planning tools and frameworks.",
    },
];

fn skeleton(seed: &SeedDoc) -> Value {
    let mut blocks = vec![
        json!({
            "type": "heading",
            "attrs": { "level": 1 },
            "content": [{ "type": "text", "text": seed.title }]
        }),
        json!({
            "type": "paragraph",
            "content": [{ "type": "text", "text": seed.blurb }]
        }),
    ];
    // The actionables starter additionally carries a next-actions section.
    if seed.category == "actionables" {
        blocks.push(json!({
            "type": "heading",
            "attrs": { "level": 2 },
            "content": [{ "type": "text", "text": "Next Actions" }]
        }));
        blocks.push(json!({
            "type": "paragraph",
            "content": [{ "type": "text", "text": "Immediate next steps." }]
        }));
    }
    json!({ "type": "doc", "content": blocks })
}

/// Seeds the built-in category documents for one user. Returns how many
/// documents were created (zero when the user already has any).
pub fn seed_user_documents(conn: &Connection, user_id: &str) -> Result<usize> {
    let existing: i64 = conn.query_row(
        "SELECT COUNT(*) FROM documents WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )?;
    if existing > 0 {
        return Ok(0);
    }

    for seed in &SEED_DOCS {
        let _ = repository::create_document(
            conn,
            user_id,
            &NewDocument {
                title: seed.title.to_string(),
                content: Some(skeleton(seed)),
                category: Some(seed.category.to_string()),
            },
        )?;
    }
    tracing::info!(user_id, count = SEED_DOCS.len(), "seeded starter documents");
    Ok(SEED_DOCS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON").unwrap();
        let _ = praxis_store::run_migrations(&conn).unwrap();
        let _ = conn
            .execute(
                "INSERT INTO users (id, username, email, created_at, updated_at)
                 VALUES ('user-1', 'u', 'u@example.com', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
                [],
            )
            .unwrap();
        conn
    }

    #[test]
    fn seeds_ten_starter_documents() {
        let conn = setup();
        assert_eq!(seed_user_documents(&conn, "user-1").unwrap(), 10);

        let docs = repository::documents_for_user(&conn, "user-1").unwrap();
        assert_eq!(docs.len(), 10);
        assert!(docs.iter().any(|d| d.category == "strategy_toolbox"));

        let actionables = repository::documents_by_category(&conn, "user-1", "actionables")
            .unwrap();
        assert_eq!(actionables.len(), 1);
        let blocks = actionables[0].content["content"].as_array().unwrap();
        assert_eq!(blocks.len(), 4);
    }

    #[test]
    fn seeding_twice_is_a_no_op() {
        let conn = setup();
        let _ = seed_user_documents(&conn, "user-1").unwrap();
        assert_eq!(seed_user_documents(&conn, "user-1").unwrap(), 0);
        assert_eq!(
            repository::documents_for_user(&conn, "user-1").unwrap().len(),
            10
        );
    }
}
