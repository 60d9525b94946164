//! Handler functions for the course catalog API.

use axum::extract::{Path, State};
use axum::Json;
use masterbis_domain::Material;

use super::models::CourseView;
use crate::auth::MaybeUser;
use crate::errors::AppResult;
use crate::AppState;

pub async fn list_courses(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
) -> AppResult<Json<Vec<CourseView>>> {
    let courses = state.catalog.courses().await?;
    Ok(Json(
        courses
            .into_iter()
            .map(|c| CourseView::for_viewer(c, viewer.as_ref()))
            .collect(),
    ))
}

pub async fn get_course(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(course_id): Path<String>,
) -> AppResult<Json<CourseView>> {
    let course = state.catalog.course(&course_id).await?;
    Ok(Json(CourseView::for_viewer(course, viewer.as_ref())))
}

pub async fn open_material(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path((course_id, material_id)): Path<(String, String)>,
) -> AppResult<Json<Material>> {
    let material = state
        .catalog
        .open_material(&course_id, &material_id, viewer.as_ref())
        .await?;
    Ok(Json(material))
}
