//! Core `masterbis-domain` crate for the course portal.
//!
//! This crate defines the repository traits (`UserStore`, `CatalogStore`,
//! `SessionStore`) the backend services are written against, the data models
//! they exchange, the material access policy and the subscription state
//! machine. In-memory implementations of every store live in [`memory`].

pub mod access;
pub mod errors;
pub mod memory;
pub mod models;
pub mod seed;
pub mod subscription;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub use access::can_access;
pub use errors::{StoreError, StoreResult};
pub use memory::{InMemoryCatalogStore, InMemorySessionStore, InMemoryUserStore};
pub use models::{Course, Material, MaterialType, NewMaterial, PasswordHash, User, UserRecord, UserRole};
pub use subscription::{SubscriptionEvent, SubscriptionState, TransitionError};

/// An authenticated session handed out at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// The account registry.
///
/// Implementations must apply every mutation of a single record atomically;
/// concurrent approve/reject calls on the same user are serialized by the
/// store, never by the caller.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: &str) -> StoreResult<User>;

    /// Case-insensitive lookup by email.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;

    /// Appends a new account. Fails with `DuplicateEmail` if the email is taken.
    async fn insert(&self, record: UserRecord) -> StoreResult<User>;

    /// Replaces the account's credential.
    async fn set_password(&self, id: &str, password: PasswordHash) -> StoreResult<()>;

    /// Runs one subscription transition as a single read-modify-write.
    async fn apply_subscription_event(
        &self,
        id: &str,
        event: SubscriptionEvent,
    ) -> StoreResult<User>;

    /// All accounts in insertion order.
    async fn list(&self) -> StoreResult<Vec<User>>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_courses(&self) -> StoreResult<Vec<Course>>;

    async fn get_course(&self, id: &str) -> StoreResult<Course>;

    /// Appends a paid material with a fresh id to the end of the course.
    async fn append_material(&self, course_id: &str, material: NewMaterial) -> StoreResult<Material>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, user_id: &str) -> StoreResult<Session>;

    async fn resolve(&self, token: &str) -> StoreResult<Option<Session>>;

    /// Returns whether a session was actually removed.
    async fn revoke(&self, token: &str) -> StoreResult<bool>;
}
