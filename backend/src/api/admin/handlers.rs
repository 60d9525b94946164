//! Handler functions for the admin dashboard.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use masterbis_domain::{Material, UserRole};
use serde::Serialize;

use crate::auth::{AdminUser, UserView};
use crate::errors::AppResult;
use crate::services::AddMaterial;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub user: UserView,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MaterialResponse {
    pub material: Material,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub courses: usize,
    pub materials: usize,
    pub students: usize,
    pub active_subscribers: usize,
    pub pending_requests: usize,
}

fn views(users: Vec<masterbis_domain::User>) -> Vec<UserView> {
    users.into_iter().map(UserView::from).collect()
}

pub async fn list_pending(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<UserView>>> {
    Ok(Json(views(state.subscriptions.pending().await?)))
}

pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<UserView>>> {
    Ok(Json(views(state.subscriptions.users().await?)))
}

pub async fn approve(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<DecisionResponse>> {
    let user = state.subscriptions.approve(&user_id).await?;
    tracing::debug!(admin_id = %admin.id, user_id = %user.id, "approval recorded");
    Ok(Json(DecisionResponse {
        message: format!("Subscription for {} is now active.", user.name),
        user: user.into(),
    }))
}

pub async fn reject(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<DecisionResponse>> {
    let user = state.subscriptions.reject(&user_id).await?;
    tracing::debug!(admin_id = %admin.id, user_id = %user.id, "rejection recorded");
    Ok(Json(DecisionResponse {
        message: format!("Subscription request from {} was rejected.", user.name),
        user: user.into(),
    }))
}

pub async fn add_material(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(course_id): Path<String>,
    payload: Result<Json<AddMaterial>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MaterialResponse>)> {
    let Json(input) = payload?;
    let material = state.catalog.add_material(&course_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MaterialResponse {
            message: format!("'{}' was published.", material.title),
            material,
        }),
    ))
}

pub async fn stats(State(state): State<AppState>, _admin: AdminUser) -> AppResult<Json<AdminStats>> {
    let courses = state.catalog.courses().await?;
    let users = state.subscriptions.users().await?;
    let students = users.iter().filter(|u| u.role == UserRole::Student);

    Ok(Json(AdminStats {
        courses: courses.len(),
        materials: courses.iter().map(|c| c.materials.len()).sum(),
        students: students.clone().count(),
        active_subscribers: students.clone().filter(|u| u.is_subscribed()).count(),
        pending_requests: students.filter(|u| u.is_pending()).count(),
    }))
}
