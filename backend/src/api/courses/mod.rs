//! Module for the course catalog API.
//!
//! Anyone may browse; each material is annotated with whether the caller can
//! open it.

pub mod handlers;
pub mod models;
pub mod routes;
