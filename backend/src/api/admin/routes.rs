//! Defines the HTTP routes for subscription review and content upload.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{add_material, approve, list_pending, list_users, reject, stats};
use crate::AppState;

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/admin/subscriptions/pending", get(list_pending))
        .route("/admin/subscriptions/:user_id/approve", post(approve))
        .route("/admin/subscriptions/:user_id/reject", post(reject))
        .route("/admin/courses/:course_id/materials", post(add_material))
        .route("/admin/users", get(list_users))
        .route("/admin/stats", get(stats))
}
