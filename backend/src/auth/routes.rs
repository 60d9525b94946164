//! Defines the HTTP routes specifically for authentication.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{login, logout, session};
use crate::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
}
