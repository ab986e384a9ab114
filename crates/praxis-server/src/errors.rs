//! The API error envelope.
//!
//! Every failure leaving a handler is an [`ApiError`]; its HTTP status and
//! JSON body (`{"message": ...}` plus an `errors` object for validation
//! failures) are fixed here in one place. Domain errors convert via `From`
//! so handlers can use `?` throughout. Internal failures are logged with
//! their cause and reach the client as a bare "Internal server error".

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use praxis_core::FieldErrors;
use serde_json::json;

/// Convenience alias for handler return types.
pub type ApiResult<T> = Result<T, ApiError>;

/// A failure with a fixed HTTP status and client-facing message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request payload failed validation. Carries per-field messages.
    #[error("{message}")]
    Validation {
        /// Top-level message, e.g. `"Invalid task data"`.
        message: String,
        /// Field-by-field failures.
        errors: FieldErrors,
    },

    /// Request was well-formed but semantically rejected.
    #[error("{message}")]
    BadRequest {
        /// Client-facing description.
        message: String,
    },

    /// Missing or invalid bearer token, or bad credentials.
    #[error("{message}")]
    Unauthorized {
        /// Client-facing description.
        message: String,
    },

    /// Resource missing, or owned by someone else (deliberately
    /// indistinguishable).
    #[error("{message}")]
    NotFound {
        /// Client-facing description.
        message: String,
    },

    /// Anything the client cannot act on. The cause is logged at
    /// construction; the response body stays generic.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// A 400 with per-field validation messages.
    #[must_use]
    pub fn validation(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }

    /// A plain 400.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// A 401.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// A 404.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Logs the cause and returns the sanitized 500.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "internal error");
        Self::Internal
    }

    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation { message, errors } => {
                json!({ "message": message, "errors": errors })
            }
            _ => json!({ "message": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<praxis_board::BoardError> for ApiError {
    fn from(err: praxis_board::BoardError) -> Self {
        use praxis_board::BoardError;
        match err {
            BoardError::GroupNotFound | BoardError::TaskNotFound => {
                Self::not_found(err.to_string())
            }
            BoardError::InvalidPosition { message } => Self::bad_request(message),
            BoardError::Sqlite(e) => Self::internal(e),
        }
    }
}

impl From<praxis_sessions::SessionError> for ApiError {
    fn from(err: praxis_sessions::SessionError) -> Self {
        use praxis_sessions::SessionError;
        match err {
            SessionError::SessionNotFound => Self::not_found(err.to_string()),
            SessionError::Sqlite(e) => Self::internal(e),
        }
    }
}

impl From<praxis_docs::DocError> for ApiError {
    fn from(err: praxis_docs::DocError) -> Self {
        use praxis_docs::DocError;
        match err {
            DocError::DocumentNotFound => Self::not_found(err.to_string()),
            DocError::Sqlite(e) => Self::internal(e),
        }
    }
}

impl From<praxis_reviews::ReviewError> for ApiError {
    fn from(err: praxis_reviews::ReviewError) -> Self {
        Self::internal(err)
    }
}

impl From<praxis_auth::AuthError> for ApiError {
    fn from(err: praxis_auth::AuthError) -> Self {
        use praxis_auth::AuthError;
        match err {
            AuthError::EmailTaken | AuthError::UsernameTaken => {
                Self::bad_request(err.to_string())
            }
            AuthError::InvalidCredentials => Self::unauthorized(err.to_string()),
            AuthError::Token(_) => Self::unauthorized("Not authenticated"),
            AuthError::Sqlite(e) => Self::internal(e),
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        Self::internal(err)
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(err: r2d2::Error) -> Self {
        Self::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_variants() {
        assert_eq!(
            ApiError::bad_request("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn group_not_found_maps_to_404_with_message() {
        let err: ApiError = praxis_board::BoardError::GroupNotFound.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Task group not found");
    }

    #[test]
    fn invalid_position_maps_to_400_with_engine_message() {
        let err: ApiError = praxis_board::BoardError::InvalidPosition {
            message: "source index 5 out of bounds for 3 groups".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn credential_failure_maps_to_401() {
        let err: ApiError = praxis_auth::AuthError::InvalidCredentials.into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn internal_error_body_is_sanitized() {
        let err = ApiError::internal("disk exploded at /var/lib/praxis.db");
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn validation_body_carries_field_errors() {
        let mut errors = FieldErrors::new();
        errors.push("title", "Title is required");
        let err = ApiError::validation("Invalid task data", errors);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
