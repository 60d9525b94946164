//! Handler functions for the logged-in user's own data.

use axum::extract::State;
use axum::Json;
use masterbis_domain::{SubscriptionState, UserRole};
use serde::Serialize;

use crate::auth::{CurrentUser, UserView};
use crate::errors::AppResult;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Carries `subscriptionStatus`.
    pub user: UserView,
    pub registered_courses: usize,
    /// Whether the "activate subscription" action should be offered.
    pub can_request_subscription: bool,
}

pub async fn dashboard(State(state): State<AppState>, current: CurrentUser) -> AppResult<Json<Dashboard>> {
    let courses = state.catalog.courses().await?;
    let user = current.user;
    Ok(Json(Dashboard {
        registered_courses: courses.len(),
        can_request_subscription: user.role == UserRole::Student
            && user.subscription == SubscriptionState::None,
        user: user.into(),
    }))
}
