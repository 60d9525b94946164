//! Module for core business logic services.
//!
//! Each service owns one slice of the portal's state behind a store trait
//! object and is shared between handlers through `AppState`.

pub mod catalog;
pub mod subscription;

pub use catalog::{AddMaterial, CatalogService};
pub use subscription::SubscriptionService;
