//! Master BIS course portal backend.
//!
//! Students browse the catalog and request subscription activation after a
//! manual payment; administrators review requests and publish new material.
//! [`app`] assembles the Axum router over an [`AppState`] built from a
//! [`Config`] and a [`Database`].

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

pub use config::Config;
pub use database::Database;

use auth::IdentityService;
use services::{CatalogService, SubscriptionService};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub identity: Arc<IdentityService>,
    pub catalog: Arc<CatalogService>,
    pub subscriptions: Arc<SubscriptionService>,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        let identity = IdentityService::new(db.users.clone(), db.sessions.clone(), config.latency.login());
        let subscriptions = SubscriptionService::new(
            db.users,
            db.sessions,
            config.latency.subscription_request(),
        );
        Self {
            identity: Arc::new(identity),
            catalog: Arc::new(CatalogService::new(db.catalog)),
            subscriptions: Arc::new(subscriptions),
            config: Arc::new(config),
        }
    }

    /// State over freshly seeded in-memory stores.
    pub async fn in_memory(config: Config) -> errors::AppResult<Self> {
        let db = Database::in_memory(&config).await?;
        Ok(Self::new(config, db))
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::auth_router())
        .merge(api::api_router())
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Welcome to Master BIS!"
}
