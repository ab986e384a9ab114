//! Per-field validation collector.
//!
//! Request payloads are validated before anything touches storage; every
//! failing field is reported at once rather than stopping at the first.
//! [`FieldErrors`] accumulates `field -> message` pairs and serializes to
//! the `errors` object of a 400 response.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Accumulated validation failures, keyed by field name.
///
/// Uses a `BTreeMap` so serialized output is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    fields: BTreeMap<String, String>,
}

impl FieldErrors {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`. A later message for the same field
    /// replaces the earlier one.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let _ = self.fields.insert(field.into(), message.into());
    }

    /// Record `"<label> is required"` when `value` is blank.
    pub fn require(&mut self, field: &str, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, format!("{label} is required"));
        }
    }

    /// Whether any failures were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
