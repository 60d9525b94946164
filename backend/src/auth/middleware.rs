//! Extractors protecting authenticated routes and enforcing roles.
//!
//! Handlers declare what they need in their signature: [`CurrentUser`] for
//! any logged-in account, [`AdminUser`] for admin-only operations, and
//! [`MaybeUser`] for routes that anonymous visitors may also call.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use masterbis_domain::User;

use super::errors::AuthError;
use crate::errors::AppError;
use crate::AppState;

/// Raw token from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

fn bearer_token(parts: &Parts) -> Result<Option<String>, AuthError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| AuthError::InvalidToken)?;
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(Some(token.trim().to_string()))
        }
        _ => Err(AuthError::InvalidToken),
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or(AuthError::MissingToken)?;
        Ok(BearerToken(token))
    }
}

#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let user = state.identity.current_user(&token).await?;
        Ok(CurrentUser { user, token })
    }
}

/// The caller's account if a valid token was sent.
///
/// A malformed or revoked token is still an error; only a missing header
/// makes the caller anonymous.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(MaybeUser(Some(state.identity.current_user(&token).await?))),
            None => Ok(MaybeUser(None)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser { user, .. } = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!(user_id = %user.id, "non-admin attempted an admin operation");
            return Err(AuthError::Forbidden("this operation requires the admin role".into()).into());
        }
        Ok(AdminUser(user))
    }
}
