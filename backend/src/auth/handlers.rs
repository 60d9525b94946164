//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse the login payload, delegate to
//! [`IdentityService`](super::service::IdentityService) and shape the response.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::middleware::{BearerToken, CurrentUser};
use super::models::{LoginRequest, LoginResponse, SessionResponse};
use crate::errors::AppResult;
use crate::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let (user, session) = state.identity.login(&request.email, &request.password).await?;
    Ok(Json(LoginResponse {
        user: user.into(),
        token: session.token,
    }))
}

/// Always `204`; an unknown or missing token has nothing left to revoke.
pub async fn logout(State(state): State<AppState>, token: Option<BearerToken>) -> AppResult<StatusCode> {
    if let Some(BearerToken(token)) = token {
        state.identity.logout(&token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn session(current: CurrentUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: current.user.into(),
    })
}
