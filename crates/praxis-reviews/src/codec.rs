//! The session-reflection preview format.
//!
//! A reflection's three long-text answers are stored in the single
//! `preview` column as labeled sections separated by blank lines:
//!
//! ```text
//! Goals Achieved: Finished the report
//!
//! Metastrategic Reflection: Used timeboxing
//!
//! Extrapolate: Need more breaks
//! ```
//!
//! Encoding truncates each answer to a preview length; the stored text is
//! a summary, not a lossless record. Decoding is total: any input string
//! yields a well-formed (possibly empty) reflection. Both directions walk
//! the same label table, so the two sides cannot drift apart.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum characters of each answer kept in the preview.
pub const PREVIEW_FIELD_LIMIT: usize = 50;

const ELLIPSIS: &str = "...";

/// Section labels in encode order. Case-sensitive, trailing colon included.
const LABELS: [&str; 3] = [
    "Goals Achieved:",
    "Metastrategic Reflection:",
    "Extrapolate:",
];

/// Per-label fallback patterns: capture from the label to the next known
/// label or the end of the string, whichever comes first.
static FALLBACKS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    std::array::from_fn(|index| {
        let label = regex::escape(LABELS[index]);
        let pattern = match LABELS.get(index + 1) {
            Some(next) => format!(r"(?s){label}\s*(.*?)(?:\s*{}|\z)", regex::escape(next)),
            None => format!(r"(?s){label}\s*(.*)\z"),
        };
        Regex::new(&pattern).expect("label patterns are valid")
    })
});

/// The decoded form of a session reflection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReflection {
    pub goals_achieved: String,
    pub metastrategic_reflection: String,
    pub extrapolate: String,
}

impl SessionReflection {
    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.goals_achieved,
            1 => &self.metastrategic_reflection,
            _ => &self.extrapolate,
        }
    }

    fn field_mut(&mut self, index: usize) -> &mut String {
        match index {
            0 => &mut self.goals_achieved,
            1 => &mut self.metastrategic_reflection,
            _ => &mut self.extrapolate,
        }
    }
}

fn truncate_field(value: &str) -> String {
    let mut out: String = value.chars().take(PREVIEW_FIELD_LIMIT).collect();
    if value.chars().nth(PREVIEW_FIELD_LIMIT).is_some() {
        out.push_str(ELLIPSIS);
    }
    out
}

/// Encodes a reflection into the labeled-section preview string.
#[must_use]
pub fn encode_preview(reflection: &SessionReflection) -> String {
    LABELS
        .iter()
        .enumerate()
        .map(|(index, label)| format!("{label} {}", truncate_field(reflection.field(index))))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn match_label(line: &str) -> Option<(usize, &str)> {
    LABELS
        .iter()
        .position(|label| line.starts_with(label))
        .map(|index| (index, line[LABELS[index].len()..].trim()))
}

/// Decodes a preview string back into its sections.
///
/// Scans line by line: a label line opens its section (capturing any
/// same-line remainder), following non-label lines are space-joined onto
/// the open section, and anything before the first label is discarded.
/// A section the scan left empty gets one more chance via its fallback
/// pattern. Never fails; unmatched sections come back empty.
#[must_use]
pub fn decode_preview(preview: &str) -> SessionReflection {
    let mut reflection = SessionReflection::default();
    let mut current: Option<usize> = None;

    for line in preview.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some((index, rest)) = match_label(trimmed) {
            current = Some(index);
            if !rest.is_empty() {
                *reflection.field_mut(index) = rest.to_string();
            }
        } else if let Some(index) = current {
            let section = reflection.field_mut(index);
            if !section.is_empty() {
                section.push(' ');
            }
            section.push_str(trimmed);
        }
    }

    for index in 0..LABELS.len() {
        if reflection.field(index).is_empty() {
            if let Some(found) = FALLBACKS[index]
                .captures(preview)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty())
            {
                *reflection.field_mut(index) = found;
            }
        }
    }

    reflection
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reflection(goals: &str, meta: &str, extrapolate: &str) -> SessionReflection {
        SessionReflection {
            goals_achieved: goals.to_string(),
            metastrategic_reflection: meta.to_string(),
            extrapolate: extrapolate.to_string(),
        }
    }

    #[test]
    fn encode_produces_labeled_sections() {
        let encoded = encode_preview(&reflection(
            "Finished the report",
            "Used timeboxing",
            "Need more breaks",
        ));
        assert_eq!(
            encoded,
            "Goals Achieved: Finished the report\n\n\
             Metastrategic Reflection: Used timeboxing\n\n\
             Extrapolate: Need more breaks"
        );
    }

    #[test]
    fn round_trip_below_threshold_is_exact() {
        let original = reflection(
            "Finished the report",
            "Used timeboxing",
            "Need more breaks",
        );
        assert_eq!(decode_preview(&encode_preview(&original)), original);
    }

    #[test]
    fn long_fields_truncate_with_ellipsis() {
        let long = "a".repeat(80);
        let decoded = decode_preview(&encode_preview(&reflection(&long, "", "")));
        assert_eq!(decoded.goals_achieved, format!("{}...", "a".repeat(50)));
        assert!(long.starts_with(decoded.goals_achieved.trim_end_matches("...")));
    }

    #[test]
    fn exactly_threshold_length_is_untouched() {
        let exact = "b".repeat(50);
        let decoded = decode_preview(&encode_preview(&reflection(&exact, "", "")));
        assert_eq!(decoded.goals_achieved, exact);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long: String = "é".repeat(60);
        let decoded = decode_preview(&encode_preview(&reflection(&long, "", "")));
        assert_eq!(decoded.goals_achieved, format!("{}...", "é".repeat(50)));
    }

    #[test]
    fn content_on_following_lines_is_captured() {
        let decoded = decode_preview(
            "Goals Achieved:\nWrote the intro\nand the outline\n\nExtrapolate: Rest more",
        );
        assert_eq!(decoded.goals_achieved, "Wrote the intro and the outline");
        assert_eq!(decoded.metastrategic_reflection, "");
        assert_eq!(decoded.extrapolate, "Rest more");
    }

    #[test]
    fn junk_before_first_label_is_discarded() {
        let decoded =
            decode_preview("session notes v2\n(unfiled)\nGoals Achieved: Shipped it");
        assert_eq!(decoded.goals_achieved, "Shipped it");
    }

    #[test]
    fn fallback_recovers_sections_from_a_single_line() {
        let decoded = decode_preview(
            "Goals Achieved: a Metastrategic Reflection: b Extrapolate: c",
        );
        // The line scan dumps the whole remainder into the first section;
        // the later two come back through the fallback patterns.
        assert_eq!(decoded.metastrategic_reflection, "b");
        assert_eq!(decoded.extrapolate, "c");
        assert!(decoded.goals_achieved.starts_with('a'));
    }

    #[test]
    fn decode_is_total_on_label_free_input() {
        let decoded = decode_preview("no labels anywhere in this text");
        assert_eq!(decoded, SessionReflection::default());
        assert_eq!(decode_preview(""), SessionReflection::default());
    }

    #[test]
    fn labels_out_of_order_still_decode() {
        let decoded = decode_preview(
            "Extrapolate: last first\n\nGoals Achieved: still found",
        );
        assert_eq!(decoded.extrapolate, "last first");
        assert_eq!(decoded.goals_achieved, "still found");
    }

    #[test]
    fn labels_are_case_sensitive() {
        let decoded = decode_preview("goals achieved: lowercase is not a label");
        assert_eq!(decoded.goals_achieved, "");
    }

    #[test]
    fn later_label_line_replaces_earlier_capture() {
        let decoded =
            decode_preview("Goals Achieved: first\nGoals Achieved: second");
        assert_eq!(decoded.goals_achieved, "second");
    }

    proptest! {
        #[test]
        fn decode_never_panics(input in ".{0,200}") {
            let _ = decode_preview(&input);
        }

        #[test]
        fn round_trip_exact_for_short_label_free_lines(
            goals in "[a-zA-Z0-9 ]{1,50}",
            meta in "[a-zA-Z0-9 ]{1,50}",
            extrapolate in "[a-zA-Z0-9 ]{1,50}",
        ) {
            prop_assume!(
                goals.trim() == goals
                    && meta.trim() == meta
                    && extrapolate.trim() == extrapolate
            );
            let original = reflection(&goals, &meta, &extrapolate);
            prop_assert_eq!(decode_preview(&encode_preview(&original)), original);
        }
    }
}
