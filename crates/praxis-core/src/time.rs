//! Timestamp formatting.

/// Current UTC time as ISO-8601 with second precision, e.g.
/// `"2025-06-01T12:30:00Z"`. All `created_at`/`updated_at` columns use
/// this format so string comparison matches chronological order.
#[must_use]
pub fn now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
