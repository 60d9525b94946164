//! Subscription workflow: student requests and admin decisions.
//!
//! State transitions are delegated to `UserStore::apply_subscription_event`,
//! which performs each one atomically, so concurrent approve and reject calls
//! for the same user cannot overwrite each other.

use std::sync::Arc;
use std::time::Duration;

use masterbis_domain::{subscription, SessionStore, SubscriptionEvent, User, UserStore};

use crate::auth::AuthError;
use crate::errors::AppResult;

pub struct SubscriptionService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    processing_delay: Duration,
}

impl SubscriptionService {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        processing_delay: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            processing_delay,
        }
    }

    /// Marks the account behind `token` as awaiting payment review.
    ///
    /// The processing delay is awaited in the request future, so a dropped
    /// request never mutates anything. A session revoked during the delay
    /// fails with `InvalidToken`.
    pub async fn request(&self, token: &str, user_id: &str) -> AppResult<User> {
        if !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
            let still_valid = self
                .sessions
                .resolve(token)
                .await?
                .is_some_and(|s| s.user_id == user_id);
            if !still_valid {
                return Err(AuthError::InvalidToken.into());
            }
        }

        let user = self
            .users
            .apply_subscription_event(user_id, SubscriptionEvent::Request)
            .await?;
        tracing::info!(user_id, "subscription requested");
        Ok(user)
    }

    pub async fn approve(&self, user_id: &str) -> AppResult<User> {
        let user = self
            .users
            .apply_subscription_event(user_id, SubscriptionEvent::Approve)
            .await?;
        tracing::info!(user_id, "subscription approved");
        Ok(user)
    }

    pub async fn reject(&self, user_id: &str) -> AppResult<User> {
        let user = self
            .users
            .apply_subscription_event(user_id, SubscriptionEvent::Reject)
            .await?;
        tracing::info!(user_id, "subscription rejected");
        Ok(user)
    }

    /// Students awaiting a decision, in registry order.
    pub async fn pending(&self) -> AppResult<Vec<User>> {
        let users = self.users.list().await?;
        Ok(subscription::pending(&users))
    }

    pub async fn users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.list().await?)
    }
}
