//! Review storage behind a trait.
//!
//! The collection used to live in ambient client-side state; here it is an
//! explicit store chosen at startup. [`MemoryReviewStore`] backs tests and
//! ephemeral runs, [`SqliteReviewStore`] is the real thing. Search and
//! session association are trait-level helpers so every backend answers
//! them identically.

use std::collections::HashMap;

use parking_lot::RwLock;
use praxis_core::{generate_id, now_iso};
use praxis_store::ConnectionPool;
use rusqlite::types::ToSql;
use rusqlite::{params, OptionalExtension, Row};

use crate::association;
use crate::errors::Result;
use crate::types::{NewReview, Review, ReviewType, UpdateReview};

/// Storage for a user's reviews.
pub trait ReviewStore: Send + Sync {
    /// Inserts a review owned by `user_id`.
    fn create(&self, user_id: &str, new: &NewReview) -> Result<Review>;

    /// The user's reviews newest-first, optionally restricted to one type.
    fn list(&self, user_id: &str, type_filter: Option<ReviewType>) -> Result<Vec<Review>>;

    /// Fetches one review, scoped to its owner.
    fn get(&self, user_id: &str, id: &str) -> Result<Option<Review>>;

    /// Applies the provided fields. Returns `None` when the review does
    /// not exist for this user.
    fn update(&self, user_id: &str, id: &str, update: &UpdateReview) -> Result<Option<Review>>;

    /// Deletes a review, reporting whether anything was removed.
    fn delete(&self, user_id: &str, id: &str) -> Result<bool>;

    /// Case-insensitive substring search over title and preview.
    fn search(&self, user_id: &str, query: &str) -> Result<Vec<Review>> {
        let needle = query.to_lowercase();
        Ok(self
            .list(user_id, None)?
            .into_iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.preview.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// The reflections belonging to one work session, resolved through the
    /// association chain.
    fn for_session(
        &self,
        user_id: &str,
        session_id: &str,
        session_title: &str,
    ) -> Result<Vec<Review>> {
        let reviews = self.list(user_id, None)?;
        Ok(association::associated_reviews(
            &reviews,
            session_id,
            session_title,
        ))
    }
}

fn build_review(user_id: &str, new: &NewReview) -> Review {
    Review {
        id: generate_id("review"),
        user_id: user_id.to_string(),
        title: new.title.clone(),
        preview: new.preview.clone().unwrap_or_default(),
        review_type: new.review_type,
        session_id: new.session_id.clone(),
        created_at: now_iso(),
        updated_at: now_iso(),
    }
}

// ─── In-memory backend ───────────────────────────────────────────────────

#[derive(Default)]
struct MemoryInner {
    seq: u64,
    rows: HashMap<String, (u64, Review)>,
}

/// Map-backed store for tests and ephemeral use.
#[derive(Default)]
pub struct MemoryReviewStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryReviewStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReviewStore for MemoryReviewStore {
    fn create(&self, user_id: &str, new: &NewReview) -> Result<Review> {
        let review = build_review(user_id, new);
        let mut inner = self.inner.write();
        inner.seq += 1;
        let seq = inner.seq;
        let _ = inner.rows.insert(review.id.clone(), (seq, review.clone()));
        Ok(review)
    }

    fn list(&self, user_id: &str, type_filter: Option<ReviewType>) -> Result<Vec<Review>> {
        let inner = self.inner.read();
        let mut rows: Vec<(u64, Review)> = inner
            .rows
            .values()
            .filter(|(_, r)| r.user_id == user_id)
            .filter(|(_, r)| type_filter.is_none_or(|t| r.review_type == t))
            .cloned()
            .collect();
        // Newest first; creation sequence breaks timestamp ties.
        rows.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| seq_b.cmp(seq_a))
        });
        Ok(rows.into_iter().map(|(_, r)| r).collect())
    }

    fn get(&self, user_id: &str, id: &str) -> Result<Option<Review>> {
        let inner = self.inner.read();
        Ok(inner
            .rows
            .get(id)
            .filter(|(_, r)| r.user_id == user_id)
            .map(|(_, r)| r.clone()))
    }

    fn update(&self, user_id: &str, id: &str, update: &UpdateReview) -> Result<Option<Review>> {
        let mut inner = self.inner.write();
        match inner.rows.get_mut(id) {
            Some((_, review)) if review.user_id == user_id => {
                if let Some(title) = &update.title {
                    review.title = title.clone();
                }
                if let Some(preview) = &update.preview {
                    review.preview = preview.clone();
                }
                if let Some(review_type) = update.review_type {
                    review.review_type = review_type;
                }
                if let Some(session_id) = &update.session_id {
                    review.session_id = session_id.clone();
                }
                review.updated_at = now_iso();
                Ok(Some(review.clone()))
            }
            _ => Ok(None),
        }
    }

    fn delete(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut inner = self.inner.write();
        let owned = inner
            .rows
            .get(id)
            .is_some_and(|(_, r)| r.user_id == user_id);
        if owned {
            let _ = inner.rows.remove(id);
        }
        Ok(owned)
    }
}

// ─── SQLite backend ──────────────────────────────────────────────────────

const REVIEW_COLUMNS: &str =
    "id, user_id, title, preview, type, session_id, created_at, updated_at";

fn row_to_review(row: &Row<'_>) -> rusqlite::Result<Review> {
    let type_raw: String = row.get(4)?;
    let review_type = ReviewType::parse(&type_raw).unwrap_or_else(|| {
        tracing::warn!(value = %type_raw, "unknown review type in database, using daily");
        ReviewType::Daily
    });
    Ok(Review {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        preview: row.get(3)?,
        review_type,
        session_id: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Pool-backed store used by the server.
pub struct SqliteReviewStore {
    pool: ConnectionPool,
}

impl SqliteReviewStore {
    #[must_use]
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

impl ReviewStore for SqliteReviewStore {
    fn create(&self, user_id: &str, new: &NewReview) -> Result<Review> {
        let review = build_review(user_id, new);
        let conn = self.pool.get()?;
        let _ = conn.execute(
            "INSERT INTO reviews (id, user_id, title, preview, type, session_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                review.id,
                review.user_id,
                review.title,
                review.preview,
                review.review_type.as_sql(),
                review.session_id,
                review.created_at,
                review.updated_at,
            ],
        )?;
        Ok(review)
    }

    fn list(&self, user_id: &str, type_filter: Option<ReviewType>) -> Result<Vec<Review>> {
        let conn = self.pool.get()?;
        let reviews = match type_filter {
            Some(review_type) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {REVIEW_COLUMNS} FROM reviews WHERE user_id = ?1 AND type = ?2
                     ORDER BY created_at DESC, id DESC"
                ))?;
                let rows = stmt
                    .query_map([user_id, review_type.as_sql()], row_to_review)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {REVIEW_COLUMNS} FROM reviews WHERE user_id = ?1
                     ORDER BY created_at DESC, id DESC"
                ))?;
                let rows = stmt
                    .query_map([user_id], row_to_review)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };
        Ok(reviews)
    }

    fn get(&self, user_id: &str, id: &str) -> Result<Option<Review>> {
        let conn = self.pool.get()?;
        let review = conn
            .query_row(
                &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1 AND user_id = ?2"),
                [id, user_id],
                row_to_review,
            )
            .optional()?;
        Ok(review)
    }

    fn update(&self, user_id: &str, id: &str, update: &UpdateReview) -> Result<Option<Review>> {
        let conn = self.pool.get()?;
        let mut sets: Vec<String> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(title) = &update.title {
            sets.push(format!("title = ?{}", values.len() + 1));
            values.push(Box::new(title.clone()));
        }
        if let Some(preview) = &update.preview {
            sets.push(format!("preview = ?{}", values.len() + 1));
            values.push(Box::new(preview.clone()));
        }
        if let Some(review_type) = update.review_type {
            sets.push(format!("type = ?{}", values.len() + 1));
            values.push(Box::new(review_type.as_sql().to_string()));
        }
        if let Some(session_id) = &update.session_id {
            sets.push(format!("session_id = ?{}", values.len() + 1));
            values.push(Box::new(session_id.clone()));
        }
        sets.push(format!("updated_at = ?{}", values.len() + 1));
        values.push(Box::new(now_iso()));

        let sql = format!(
            "UPDATE reviews SET {} WHERE id = ?{} AND user_id = ?{}",
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
        drop(conn);
        self.get(user_id, id)
    }

    fn delete(&self, user_id: &str, id: &str) -> Result<bool> {
        let conn = self.pool.get()?;
        let changed = conn.execute(
            "DELETE FROM reviews WHERE id = ?1 AND user_id = ?2",
            [id, user_id],
        )?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use praxis_store::ConnectionConfig;

    fn new_review(title: &str, review_type: ReviewType, session_id: Option<&str>) -> NewReview {
        NewReview {
            title: title.to_string(),
            preview: Some(format!("{title} preview")),
            review_type,
            session_id: session_id.map(str::to_string),
        }
    }

    fn sqlite_store() -> (tempfile::TempDir, SqliteReviewStore) {
        let dir = tempfile::tempdir().unwrap();
        let pool =
            praxis_store::pool::new_file(dir.path().join("reviews.db"), &ConnectionConfig::default())
                .unwrap();
        {
            let conn = pool.get().unwrap();
            let _ = praxis_store::run_migrations(&conn).unwrap();
            let _ = conn
                .execute(
                    "INSERT INTO users (id, username, email, created_at, updated_at)
                     VALUES ('user-1', 'u', 'u@example.com', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z'),
                            ('user-2', 'v', 'v@example.com', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
                    [],
                )
                .unwrap();
        }
        (dir, SqliteReviewStore::new(pool))
    }

    fn exercise_crud(store: &dyn ReviewStore) {
        let created = store
            .create("user-1", &new_review("Week 8", ReviewType::Weekly, None))
            .unwrap();
        assert!(created.id.starts_with("review-"));

        let fetched = store.get("user-1", &created.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Week 8");

        // Foreign users see nothing.
        assert!(store.get("user-2", &created.id).unwrap().is_none());
        assert!(!store.delete("user-2", &created.id).unwrap());

        let updated = store
            .update(
                "user-1",
                &created.id,
                &UpdateReview {
                    title: Some("Week 8 (revised)".to_string()),
                    ..UpdateReview::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Week 8 (revised)");
        assert_eq!(updated.preview, "Week 8 preview");

        assert!(store.delete("user-1", &created.id).unwrap());
        assert!(store.get("user-1", &created.id).unwrap().is_none());
    }

    fn exercise_type_filter(store: &dyn ReviewStore) {
        let _ = store
            .create("user-1", &new_review("Daily one", ReviewType::Daily, None))
            .unwrap();
        let _ = store
            .create("user-1", &new_review("Week 9", ReviewType::Weekly, None))
            .unwrap();

        let weekly = store.list("user-1", Some(ReviewType::Weekly)).unwrap();
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].title, "Week 9");
        assert_eq!(store.list("user-1", None).unwrap().len(), 2);
        assert!(store.list("user-2", None).unwrap().is_empty());
    }

    fn exercise_search(store: &dyn ReviewStore) {
        let _ = store
            .create(
                "user-1",
                &NewReview {
                    title: "Quarterly planning".to_string(),
                    preview: Some("Revisit the roadmap".to_string()),
                    review_type: ReviewType::Monthly,
                    session_id: None,
                },
            )
            .unwrap();
        let _ = store
            .create("user-1", &new_review("Week 10", ReviewType::Weekly, None))
            .unwrap();

        let by_title = store.search("user-1", "quarterly").unwrap();
        assert_eq!(by_title.len(), 1);

        let by_preview = store.search("user-1", "ROADMAP").unwrap();
        assert_eq!(by_preview.len(), 1);

        assert!(store.search("user-1", "nothing here").unwrap().is_empty());
    }

    fn exercise_session_link(store: &dyn ReviewStore) {
        let _ = store
            .create(
                "user-1",
                &new_review("Untagged", ReviewType::Session, Some("session-1")),
            )
            .unwrap();
        let _ = store
            .create("user-1", &new_review("Week 11", ReviewType::Weekly, None))
            .unwrap();

        let linked = store
            .for_session("user-1", "session-1", "Morning block")
            .unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].title, "Untagged");

        // Breaking the link drops the association.
        let _ = store
            .update(
                "user-1",
                &linked[0].id,
                &UpdateReview {
                    session_id: Some(None),
                    ..UpdateReview::default()
                },
            )
            .unwrap();
        assert!(store
            .for_session("user-1", "session-1", "Morning block")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn memory_store_crud() {
        exercise_crud(&MemoryReviewStore::new());
    }

    #[test]
    fn memory_store_type_filter() {
        exercise_type_filter(&MemoryReviewStore::new());
    }

    #[test]
    fn memory_store_search() {
        exercise_search(&MemoryReviewStore::new());
    }

    #[test]
    fn memory_store_session_link() {
        exercise_session_link(&MemoryReviewStore::new());
    }

    #[test]
    fn memory_store_newest_first_on_ties() {
        let store = MemoryReviewStore::new();
        let _ = store
            .create("user-1", &new_review("older", ReviewType::Daily, None))
            .unwrap();
        let _ = store
            .create("user-1", &new_review("newer", ReviewType::Daily, None))
            .unwrap();
        let listed = store.list("user-1", None).unwrap();
        assert_eq!(listed[0].title, "newer");
        assert_eq!(listed[1].title, "older");
    }

    #[test]
    fn sqlite_store_crud() {
        let (_dir, store) = sqlite_store();
        exercise_crud(&store);
    }

    #[test]
    fn sqlite_store_type_filter() {
        let (_dir, store) = sqlite_store();
        exercise_type_filter(&store);
    }

    #[test]
    fn sqlite_store_search() {
        let (_dir, store) = sqlite_store();
        exercise_search(&store);
    }

    #[test]
    fn sqlite_store_session_link() {
        let (_dir, store) = sqlite_store();
        exercise_session_link(&store);
    }

    #[test]
    fn sqlite_store_orders_by_created_at() {
        let (_dir, store) = sqlite_store();
        let old = store
            .create("user-1", &new_review("older", ReviewType::Daily, None))
            .unwrap();
        let _ = store
            .create("user-1", &new_review("newer", ReviewType::Daily, None))
            .unwrap();
        {
            let conn = store.pool.get().unwrap();
            let _ = conn
                .execute(
                    "UPDATE reviews SET created_at = '2025-01-01T00:00:00Z' WHERE id = ?1",
                    [&old.id],
                )
                .unwrap();
        }
        let listed = store.list("user-1", None).unwrap();
        assert_eq!(listed[0].title, "newer");
        assert_eq!(listed[1].title, "older");
    }
}
