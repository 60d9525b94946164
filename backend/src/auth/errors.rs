//! Custom error types specific to authentication failures.
//!
//! Missing or stale tokens and wrong passwords map to `401`, a valid session
//! without the required privilege maps to `403`.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("session is invalid or has expired")]
    InvalidToken,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}
