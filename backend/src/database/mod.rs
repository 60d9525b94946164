//! Store setup and seeding.
//!
//! Builds the process-local stores the services run on: the seeded catalog,
//! the user registry (admin first, then the demo students) and an empty
//! session table. Every seeded credential comes from configuration.

use std::sync::Arc;

use masterbis_domain::{
    seed, CatalogStore, InMemoryCatalogStore, InMemorySessionStore, InMemoryUserStore, SessionStore,
    UserStore,
};

use crate::auth::hash_password;
use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct Database {
    pub users: Arc<dyn UserStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub sessions: Arc<dyn SessionStore>,
}

impl Database {
    /// Fails if `admin.password` is unset, so the admin account is never
    /// reachable without a credential.
    pub async fn in_memory(config: &Config) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let admin = &config.admin;
        let admin_password = admin.password.as_deref().unwrap_or_default();

        let students = seed::students();
        let student_ids: Vec<String> = students.iter().map(|s| s.id.clone()).collect();
        let mut accounts = vec![seed::admin(&admin.email, &admin.name)];
        accounts.extend(students);

        let users = InMemoryUserStore::with_users(accounts)?;
        users
            .set_password(seed::ADMIN_ID, hash_password(admin_password)?)
            .await?;
        match config.demo.student_password.as_deref() {
            Some(password) if !password.is_empty() => {
                for id in &student_ids {
                    users.set_password(id, hash_password(password)?).await?;
                }
            }
            _ => tracing::info!("no demo student password configured; demo accounts are locked"),
        }

        let catalog = InMemoryCatalogStore::seeded();
        tracing::debug!(
            courses = catalog.list_courses().await?.len(),
            users = users.list().await?.len(),
            "seeded in-memory stores"
        );

        Ok(Self {
            users: Arc::new(users),
            catalog: Arc::new(catalog),
            sessions: Arc::new(InMemorySessionStore::new()),
        })
    }
}
