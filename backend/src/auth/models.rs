//! Data structures for authentication-related entities.
//!
//! This module defines the login payloads and the public view of an account.
//! The view re-derives the `isSubscribed`/`pendingSubscription` flag pair
//! from the subscription state so the two can never both be set.

use chrono::{DateTime, Utc};
use masterbis_domain::{SubscriptionState, User, UserRole};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserView,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub user: UserView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_subscribed: bool,
    pub pending_subscription: bool,
    pub subscription_status: SubscriptionState,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        let (is_subscribed, pending_subscription) = user.subscription.flags();
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            is_subscribed,
            pending_subscription,
            subscription_status: user.subscription,
            created_at: user.created_at,
        }
    }
}
