//! Custom error types for the `masterbis-domain` crate.
//!
//! Store implementations report lookups of unknown ids, duplicate accounts and
//! illegal subscription transitions through [`StoreError`] so the backend can
//! map each of them to a distinct response.

use thiserror::Error;

use crate::subscription::TransitionError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user '{0}' not found")]
    UserNotFound(String),

    #[error("course '{0}' not found")]
    CourseNotFound(String),

    #[error("material '{material_id}' not found in course '{course_id}'")]
    MaterialNotFound {
        course_id: String,
        material_id: String,
    },

    #[error("an account for '{0}' already exists")]
    DuplicateEmail(String),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

pub type StoreResult<T> = Result<T, StoreError>;
