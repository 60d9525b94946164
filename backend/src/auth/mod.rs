//! Authentication module for managing user accounts, sessions, and access control.
//!
//! This module provides the public interface for login, logout and session
//! lookup, plus the request extractors that gate every other route.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use middleware::*;
pub use models::*;
pub use routes::*;
pub use service::*;
