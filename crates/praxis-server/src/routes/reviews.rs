//! Review endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use praxis_core::FieldErrors;
use praxis_reviews::{NewReview, Review, ReviewType, UpdateReview};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::{ApiError, ApiResult};
use crate::routes::parse_body;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    /// Restrict to one review type.
    #[serde(rename = "type", default)]
    kind: Option<String>,
    /// Case-insensitive substring over title and preview.
    #[serde(default)]
    search: Option<String>,
}

/// GET /api/reviews
pub(crate) async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Review>>> {
    let type_filter = match query.kind.as_deref() {
        None => None,
        Some(raw) => Some(
            ReviewType::parse(raw).ok_or_else(|| ApiError::bad_request("Invalid review type"))?,
        ),
    };

    let reviews = match query.search.as_deref().map(str::trim) {
        Some(needle) if !needle.is_empty() => {
            let mut hits = state.reviews.search(&caller.id, needle)?;
            if let Some(filter) = type_filter {
                hits.retain(|r| r.review_type == filter);
            }
            hits
        }
        _ => state.reviews.list(&caller.id, type_filter)?,
    };
    Ok(Json(reviews))
}

/// GET /api/reviews/:id
pub(crate) async fn get_one(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Review>> {
    let review = state
        .reviews
        .get(&caller.id, &id)?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;
    Ok(Json(review))
}

/// POST /api/reviews
pub(crate) async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<Review>)> {
    let new: NewReview = parse_body(body, "Invalid review data")?;

    let mut errors = FieldErrors::new();
    errors.require("title", "Title", &new.title);
    errors
        .into_result()
        .map_err(|errors| ApiError::validation("Invalid review data", errors))?;

    let review = state.reviews.create(&caller.id, &new)?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// PUT /api/reviews/:id
pub(crate) async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Review>> {
    let update: UpdateReview = parse_body(body, "Invalid review data")?;
    let review = state
        .reviews
        .update(&caller.id, &id, &update)?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;
    Ok(Json(review))
}

/// DELETE /api/reviews/:id
pub(crate) async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !state.reviews.delete(&caller.id, &id)? {
        return Err(ApiError::not_found("Review not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
