//! Material gating.

use crate::models::{Material, User};

/// Decides whether `user` may open `material`.
///
/// Free material is open to everyone, including anonymous visitors. Paid
/// material needs an active subscription, and the admin role always wins
/// over subscription state.
pub fn can_access(user: Option<&User>, material: &Material) -> bool {
    material.is_free || user.is_some_and(|u| u.is_admin() || u.is_subscribed())
}
