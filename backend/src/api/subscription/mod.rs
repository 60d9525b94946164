//! Module for the student side of the subscription workflow.

pub mod handlers;
pub mod routes;
