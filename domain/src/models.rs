//! Core data models shared by the stores and the backend.
//!
//! These are the internal representations of users, courses and materials.
//! The HTTP layer derives its own views from them (for example, the
//! `isSubscribed`/`pendingSubscription` flag pair is computed from
//! [`SubscriptionState`] rather than stored).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::subscription::SubscriptionState;

/// Role claim attached to an account when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    Admin,
}

impl UserRole {
    pub fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Student => f.write_str("STUDENT"),
            UserRole::Admin => f.write_str("ADMIN"),
        }
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub subscription: SubscriptionState,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a fresh student account in state `NONE`.
    ///
    /// The display name is the local part of the email address.
    pub fn new_student(id: impl Into<String>, email: &str) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            id: id.into(),
            name,
            email: email.to_string(),
            role: UserRole::Student,
            subscription: SubscriptionState::None,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription == SubscriptionState::Active
    }

    pub fn is_pending(&self) -> bool {
        self.subscription == SubscriptionState::Pending
    }
}

/// Salted password digest, both parts hex encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    pub salt: String,
    pub digest: String,
}

/// A user together with the credential used to log in.
///
/// An account without a credential cannot log in until one is set.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password: Option<PasswordHash>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialType {
    Video,
    Pdf,
    Quiz,
}

impl FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VIDEO" => Ok(MaterialType::Video),
            "PDF" => Ok(MaterialType::Pdf),
            "QUIZ" => Ok(MaterialType::Quiz),
            other => Err(format!("unknown material type '{other}'")),
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialType::Video => f.write_str("VIDEO"),
            MaterialType::Pdf => f.write_str("PDF"),
            MaterialType::Quiz => f.write_str("QUIZ"),
        }
    }
}

/// A single piece of course content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    pub is_free: bool,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Already validated input for appending a material to a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaterial {
    pub title: String,
    pub kind: MaterialType,
    pub url: String,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub thumbnail: String,
    pub materials: Vec<Material>,
}

impl Course {
    pub fn material(&self, material_id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == material_id)
    }

    pub fn count_of(&self, kind: MaterialType) -> usize {
        self.materials.iter().filter(|m| m.kind == kind).count()
    }
}
