//! Subscription workflow state machine.
//!
//! A student moves `NONE -> PENDING` by requesting activation after a manual
//! payment, and an administrator then approves (`PENDING -> ACTIVE`) or
//! rejects (`PENDING -> NONE`). The three states are mutually exclusive.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::User;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionState {
    #[default]
    None,
    Pending,
    Active,
}

impl SubscriptionState {
    /// Legacy flag pair `(isSubscribed, pendingSubscription)`.
    pub fn flags(self) -> (bool, bool) {
        match self {
            SubscriptionState::None => (false, false),
            SubscriptionState::Pending => (false, true),
            SubscriptionState::Active => (true, false),
        }
    }

    /// Applies `event`, returning the next state.
    ///
    /// Re-requesting while pending and re-approving while active are no-ops.
    pub fn apply(self, event: SubscriptionEvent) -> Result<Self, TransitionError> {
        use SubscriptionEvent::*;
        use SubscriptionState::*;

        match (self, event) {
            (None | Pending, Request) => Ok(Pending),
            (Pending | Active, Approve) => Ok(Active),
            (Pending, Reject) => Ok(None),
            (from, event) => Err(TransitionError { from, event }),
        }
    }
}

impl fmt::Display for SubscriptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionState::None => f.write_str("NONE"),
            SubscriptionState::Pending => f.write_str("PENDING"),
            SubscriptionState::Active => f.write_str("ACTIVE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionEvent {
    Request,
    Approve,
    Reject,
}

impl fmt::Display for SubscriptionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionEvent::Request => f.write_str("request"),
            SubscriptionEvent::Approve => f.write_str("approve"),
            SubscriptionEvent::Reject => f.write_str("reject"),
        }
    }
}

/// Registry entries awaiting an admin decision, in registry order.
pub fn pending<'a>(users: impl IntoIterator<Item = &'a User>) -> Vec<User> {
    users
        .into_iter()
        .filter(|u| u.subscription == SubscriptionState::Pending)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {event} a subscription in state {from}")]
pub struct TransitionError {
    pub from: SubscriptionState,
    pub event: SubscriptionEvent,
}
