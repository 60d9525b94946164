//! Module for per-user endpoints that sit outside the login flow, such as
//! the student dashboard.

pub mod handlers;
pub mod routes;
