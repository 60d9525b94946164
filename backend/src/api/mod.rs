//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the catalog, subscription,
//! admin and per-user routes. Login and session routes live in `auth`.

pub mod admin;
pub mod courses;
pub mod subscription;
pub mod user;

use axum::Router;

use crate::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(courses::routes::courses_router())
        .merge(subscription::routes::subscription_router())
        .merge(admin::routes::admin_router())
        .merge(user::routes::user_router())
}
