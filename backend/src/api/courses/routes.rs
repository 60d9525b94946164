//! Defines the HTTP routes for browsing courses and opening materials.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_course, list_courses, open_material};
use crate::AppState;

pub fn courses_router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/:course_id", get(get_course))
        .route("/courses/:course_id/materials/:material_id", get(open_material))
}
