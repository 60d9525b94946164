//! Module for administrator operations.
//!
//! Every handler here takes an [`AdminUser`](crate::auth::AdminUser), so
//! student and anonymous callers are turned away before any state is read.

pub mod handlers;
pub mod routes;
