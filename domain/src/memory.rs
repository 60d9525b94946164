//! Process-local implementations of the store traits.
//!
//! Each store keeps its state behind a `parking_lot::RwLock`. Locks are never
//! held across an `.await`, so every trait method is one critical section.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::errors::{StoreError, StoreResult};
use crate::models::{Course, Material, NewMaterial, PasswordHash, User, UserRecord};
use crate::subscription::SubscriptionEvent;
use crate::{seed, CatalogStore, Session, SessionStore, UserStore};

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Default)]
struct Registry {
    records: Vec<UserRecord>,
    by_id: HashMap<String, usize>,
    by_email: HashMap<String, usize>,
}

impl Registry {
    fn push(&mut self, record: UserRecord) -> StoreResult<User> {
        let key = email_key(&record.user.email);
        if self.by_email.contains_key(&key) {
            return Err(StoreError::DuplicateEmail(record.user.email));
        }
        let idx = self.records.len();
        self.by_id.insert(record.user.id.clone(), idx);
        self.by_email.insert(key, idx);
        let user = record.user.clone();
        self.records.push(record);
        Ok(user)
    }

    fn get_mut(&mut self, id: &str) -> StoreResult<&mut UserRecord> {
        let idx = *self
            .by_id
            .get(id)
            .ok_or_else(|| StoreError::UserNotFound(id.to_string()))?;
        Ok(&mut self.records[idx])
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    registry: RwLock<Registry>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with `users` (no credentials), in order.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> StoreResult<Self> {
        let mut registry = Registry::default();
        for user in users {
            registry.push(UserRecord { user, password: None })?;
        }
        Ok(Self {
            registry: RwLock::new(registry),
        })
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, id: &str) -> StoreResult<User> {
        let registry = self.registry.read();
        registry
            .by_id
            .get(id)
            .map(|&idx| registry.records[idx].user.clone())
            .ok_or_else(|| StoreError::UserNotFound(id.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let registry = self.registry.read();
        Ok(registry
            .by_email
            .get(&email_key(email))
            .map(|&idx| registry.records[idx].clone()))
    }

    async fn insert(&self, record: UserRecord) -> StoreResult<User> {
        let user = self.registry.write().push(record)?;
        log::debug!("registered user {} ({})", user.id, user.role);
        Ok(user)
    }

    async fn set_password(&self, id: &str, password: PasswordHash) -> StoreResult<()> {
        self.registry.write().get_mut(id)?.password = Some(password);
        Ok(())
    }

    async fn apply_subscription_event(
        &self,
        id: &str,
        event: SubscriptionEvent,
    ) -> StoreResult<User> {
        let mut registry = self.registry.write();
        let record = registry.get_mut(id)?;
        let next = record.user.subscription.apply(event)?;
        log::debug!(
            "subscription of {}: {} -[{}]-> {}",
            id,
            record.user.subscription,
            event,
            next
        );
        record.user.subscription = next;
        Ok(record.user.clone())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self
            .registry
            .read()
            .records
            .iter()
            .map(|r| r.user.clone())
            .collect())
    }
}

pub struct InMemoryCatalogStore {
    courses: RwLock<Vec<Course>>,
}

impl InMemoryCatalogStore {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses: RwLock::new(courses),
        }
    }

    /// Catalog holding the built-in courses.
    pub fn seeded() -> Self {
        Self::new(seed::courses())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list_courses(&self) -> StoreResult<Vec<Course>> {
        Ok(self.courses.read().clone())
    }

    async fn get_course(&self, id: &str) -> StoreResult<Course> {
        self.courses
            .read()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| StoreError::CourseNotFound(id.to_string()))
    }

    async fn append_material(&self, course_id: &str, material: NewMaterial) -> StoreResult<Material> {
        let mut courses = self.courses.write();
        let course = courses
            .iter_mut()
            .find(|c| c.id == course_id)
            .ok_or_else(|| StoreError::CourseNotFound(course_id.to_string()))?;

        let material = Material {
            id: format!("new_{}", Uuid::new_v4().simple()),
            title: material.title,
            kind: material.kind,
            is_free: false,
            url: material.url,
            duration: material.duration,
        };
        course.materials.push(material.clone());
        log::debug!("appended material {} to course {}", material.id, course_id);
        Ok(material)
    }
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: &str) -> StoreResult<Session> {
        let session = Session {
            token: format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
        };
        self.sessions
            .write()
            .insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn resolve(&self, token: &str) -> StoreResult<Option<Session>> {
        Ok(self.sessions.read().get(token).cloned())
    }

    async fn revoke(&self, token: &str) -> StoreResult<bool> {
        Ok(self.sessions.write().remove(token).is_some())
    }
}
