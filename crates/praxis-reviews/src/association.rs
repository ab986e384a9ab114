//! Resolving which reviews belong to a work session.
//!
//! Older data predates the `sessionId` column and is only connected to
//! its session through the review title. Resolution therefore walks an
//! ordered chain and returns the first stage that matches anything:
//!
//! 1. stored `sessionId` equals the session's id;
//! 2. the literal `[Session#<id>]` tag appears in the review title;
//! 3. the session's title appears in the review title, in any of the
//!    three historical phrasings.
//!
//! New writes always carry `sessionId`, so stages 2 and 3 only ever fire
//! for imported data.

use crate::types::{Review, ReviewType};

/// The tag embedded in reflection titles: `[Session#<id>]`.
#[must_use]
pub fn session_tag(session_id: &str) -> String {
    format!("[Session#{session_id}]")
}

/// The full title given to a session reflection review.
#[must_use]
pub fn reflection_title(session_id: &str, session_title: &str) -> String {
    format!("{} Work Session Reflection - {session_title}", session_tag(session_id))
}

/// Filters `reviews` down to the session's reflections via the fallback
/// chain. Only reviews of type `session` are considered.
#[must_use]
pub fn associated_reviews(
    reviews: &[Review],
    session_id: &str,
    session_title: &str,
) -> Vec<Review> {
    let candidates: Vec<&Review> = reviews
        .iter()
        .filter(|r| r.review_type == ReviewType::Session)
        .collect();

    let by_id: Vec<Review> = candidates
        .iter()
        .filter(|r| r.session_id.as_deref() == Some(session_id))
        .map(|r| (*r).clone())
        .collect();
    if !by_id.is_empty() {
        return by_id;
    }

    let tag = session_tag(session_id);
    let by_tag: Vec<Review> = candidates
        .iter()
        .filter(|r| r.title.contains(&tag))
        .map(|r| (*r).clone())
        .collect();
    if !by_tag.is_empty() {
        return by_tag;
    }

    let phrasings = [
        session_title.to_string(),
        format!("Session Reflection - {session_title}"),
        format!("Work Session Reflection - {session_title}"),
    ];
    candidates
        .iter()
        .filter(|r| phrasings.iter().any(|p| r.title.contains(p.as_str())))
        .map(|r| (*r).clone())
        .collect()
}
