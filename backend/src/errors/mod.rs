//! Global application error types and handlers.
//!
//! Every handler returns `Result<_, AppError>`. The error renders as a JSON
//! body `{"error": <kind>, "message": <text>}` that clients show inline.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use masterbis_domain::StoreError;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::NotFound(_) => "NotFoundError",
            AppError::Auth(_) => "AuthError",
            AppError::Conflict(_) => "ConflictError",
            AppError::Internal(_) => "InternalError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Auth(err) => err.status(),
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound(_)
            | StoreError::CourseNotFound(_)
            | StoreError::MaterialNotFound { .. } => AppError::NotFound(err.to_string()),
            StoreError::DuplicateEmail(_) | StoreError::Transition(_) => {
                AppError::Conflict(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(kind = self.kind(), error = %self, "request rejected");
        }
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use masterbis_domain::{SubscriptionEvent, SubscriptionState, TransitionError};

    #[test]
    fn store_errors_map_to_taxonomy() {
        let not_found: AppError = StoreError::CourseNotFound("x".into()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.kind(), "NotFoundError");

        let transition: AppError = StoreError::Transition(TransitionError {
            from: SubscriptionState::None,
            event: SubscriptionEvent::Approve,
        })
        .into();
        assert_eq!(transition.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn auth_errors_keep_their_status() {
        let err: AppError = AuthError::Forbidden("admins only".into()).into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        let err: AppError = AuthError::MissingToken.into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.kind(), "AuthError");
    }
}
