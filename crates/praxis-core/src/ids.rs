//! Entity id generation.
//!
//! Every row gets a `"<prefix>-<uuid>"` id where the UUID is v7
//! (time-ordered), so ids sort roughly by creation time and the prefix
//! makes logs and foreign keys self-describing.

use uuid::Uuid;

/// Generate a prefixed UUID v7 id, e.g. `"task-0192b5c8-…"`.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
