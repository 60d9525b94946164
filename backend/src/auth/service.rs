//! Core business logic for the authentication system.
//!
//! This service resolves an email to an account (registering students on
//! first login), verifies Argon2id password digests, and issues and revokes
//! session tokens. Accounts live in the shared `UserStore`; a session holds
//! only the user id, so every request sees the current registry record.

use std::sync::Arc;
use std::time::Duration;

use argon2::Argon2;
use masterbis_domain::{
    PasswordHash, Session, SessionStore, StoreError, User, UserRecord, UserStore,
};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use super::errors::AuthError;
use crate::errors::{AppError, AppResult};

const DIGEST_LEN: usize = 32;

/// Stretches `password` with Argon2id under a fresh random salt.
pub fn hash_password(password: &str) -> AppResult<PasswordHash> {
    let salt = Uuid::new_v4().into_bytes();
    let digest = stretch(password, &salt)?;
    Ok(PasswordHash {
        salt: hex::encode(salt),
        digest: hex::encode(digest),
    })
}

pub fn verify_password(hash: &PasswordHash, password: &str) -> AppResult<bool> {
    let salt = hex::decode(&hash.salt)
        .map_err(|e| AppError::Internal(format!("corrupt password salt: {e}")))?;
    let candidate = hex::encode(stretch(password, &salt)?);
    Ok(candidate.as_bytes().ct_eq(hash.digest.as_bytes()).into())
}

fn stretch(password: &str, salt: &[u8]) -> AppResult<[u8; DIGEST_LEN]> {
    let mut out = [0u8; DIGEST_LEN];
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
    Ok(out)
}

/// Trims `raw` and checks it looks like `local@domain`.
pub fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(email.to_string())
    } else {
        Err(AppError::validation(format!("'{email}' is not a valid email address")))
    }
}

fn check_credential(record: &UserRecord, password: &str) -> AppResult<()> {
    let Some(credential) = &record.password else {
        tracing::warn!(user_id = %record.user.id, "login rejected: account has no credential");
        return Err(AuthError::InvalidCredentials.into());
    };
    if !verify_password(credential, password)? {
        tracing::warn!(user_id = %record.user.id, "login rejected: wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }
    Ok(())
}

pub struct IdentityService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    latency: Duration,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserStore>, sessions: Arc<dyn SessionStore>, latency: Duration) -> Self {
        Self {
            users,
            sessions,
            latency,
        }
    }

    /// Logs in with `email`, registering a student account if it is unknown.
    ///
    /// A new student's password is set at registration. Existing accounts
    /// must present the credential they were seeded or registered with; an
    /// account without one cannot log in.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, Session)> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(AppError::validation("password is required"));
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let user = match self.users.find_by_email(&email).await? {
            Some(record) => {
                check_credential(&record, password)?;
                record.user
            }
            None => self.register(&email, password).await?,
        };

        let session = self.sessions.create(&user.id).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "user logged in");
        Ok((user, session))
    }

    async fn register(&self, email: &str, password: &str) -> AppResult<User> {
        let record = UserRecord {
            user: User::new_student(format!("u_{}", Uuid::new_v4().simple()), email),
            password: Some(hash_password(password)?),
        };
        match self.users.insert(record).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "registered new student");
                Ok(user)
            }
            // Lost a race with a concurrent first login for the same email.
            Err(StoreError::DuplicateEmail(_)) => {
                let record = self
                    .users
                    .find_by_email(email)
                    .await?
                    .ok_or_else(|| AppError::Internal(format!("account for {email} vanished")))?;
                check_credential(&record, password)?;
                Ok(record.user)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn logout(&self, token: &str) -> AppResult<()> {
        if let Some(session) = self.sessions.resolve(token).await? {
            self.sessions.revoke(token).await?;
            tracing::info!(user_id = %session.user_id, "user logged out");
        }
        Ok(())
    }

    /// The registry record behind `token`.
    pub async fn current_user(&self, token: &str) -> AppResult<User> {
        let session = self
            .sessions
            .resolve(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;
        match self.users.get(&session.user_id).await {
            Ok(user) => Ok(user),
            Err(StoreError::UserNotFound(_)) => Err(AuthError::InvalidToken.into()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masterbis_domain::{seed, InMemorySessionStore, InMemoryUserStore, SubscriptionState, UserRole};

    const ADMIN_PASSWORD: &str = "admin-pw";
    const DEMO_PASSWORD: &str = "demo-pw";

    fn seeded_store() -> InMemoryUserStore {
        let mut users = vec![seed::admin("admin@masterbis.com", "Admin User")];
        users.extend(seed::students());
        InMemoryUserStore::with_users(users).unwrap()
    }

    async fn service_with(latency: Duration, demo_password: Option<&str>) -> IdentityService {
        let users = seeded_store();
        users
            .set_password(seed::ADMIN_ID, hash_password(ADMIN_PASSWORD).unwrap())
            .await
            .unwrap();
        if let Some(password) = demo_password {
            for student in seed::students() {
                users
                    .set_password(&student.id, hash_password(password).unwrap())
                    .await
                    .unwrap();
            }
        }
        IdentityService::new(Arc::new(users), Arc::new(InMemorySessionStore::new()), latency)
    }

    async fn service() -> IdentityService {
        service_with(Duration::ZERO, Some(DEMO_PASSWORD)).await
    }

    fn is_invalid_credentials(result: AppResult<(User, Session)>) -> bool {
        matches!(result, Err(AppError::Auth(AuthError::InvalidCredentials)))
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert_eq!(hash.digest.len(), DIGEST_LEN * 2);
        assert!(verify_password(&hash, "hunter2").unwrap());
        assert!(!verify_password(&hash, "hunter3").unwrap());
        assert_ne!(hash_password("hunter2").unwrap().salt, hash.salt);
    }

    #[test]
    fn truncated_digest_never_matches() {
        let mut hash = hash_password("hunter2").unwrap();
        hash.digest.truncate(DIGEST_LEN);
        assert!(!verify_password(&hash, "hunter2").unwrap());
    }

    #[test]
    fn corrupt_salt_is_an_internal_error() {
        let hash = PasswordHash {
            salt: "not hex".into(),
            digest: String::new(),
        };
        assert!(matches!(verify_password(&hash, "pw"), Err(AppError::Internal(_))));
    }

    #[test]
    fn email_validation() {
        assert_eq!(normalize_email("  karim@bis.com ").unwrap(), "karim@bis.com");
        for bad in ["", "karim", "@bis.com", "karim@", "a@b@c", "ka rim@bis.com"] {
            assert!(matches!(normalize_email(bad), Err(AppError::Validation(_))), "{bad}");
        }
    }

    #[tokio::test]
    async fn admin_login_ignores_email_case() {
        let identity = service().await;
        let (user, _) = identity.login("ADMIN@MasterBis.com", ADMIN_PASSWORD).await.unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert!(user.is_subscribed());
    }

    #[tokio::test]
    async fn stranger_cannot_take_over_the_admin_account() {
        let identity = service().await;
        assert!(is_invalid_credentials(
            identity.login("admin@masterbis.com", "guess").await
        ));
        let (user, _) = identity.login("admin@masterbis.com", ADMIN_PASSWORD).await.unwrap();
        assert_eq!(user.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn demo_students_without_a_configured_password_are_locked() {
        let identity = service_with(Duration::ZERO, None).await;
        for email in ["sara@bis.com", "ahmed@bis.com", "karim@bis.com"] {
            assert!(is_invalid_credentials(identity.login(email, "first-try").await), "{email}");
            // No password was adopted by the failed attempt.
            assert!(is_invalid_credentials(identity.login(email, "first-try").await), "{email}");
        }
    }

    #[tokio::test]
    async fn active_demo_student_requires_the_demo_password() {
        let identity = service().await;
        assert!(is_invalid_credentials(identity.login("sara@bis.com", "guess").await));
        let (user, _) = identity.login("sara@bis.com", DEMO_PASSWORD).await.unwrap();
        assert_eq!(user.subscription, SubscriptionState::Active);
    }

    #[tokio::test]
    async fn unknown_email_registers_a_student() {
        let identity = service().await;
        let (user, session) = identity.login("newbie@bis.com", "pw").await.unwrap();
        assert_eq!(user.role, UserRole::Student);
        assert_eq!(user.name, "newbie");
        assert_eq!(user.subscription, SubscriptionState::None);
        assert!(user.id.starts_with("u_"));
        assert_eq!(identity.current_user(&session.token).await.unwrap(), user);
    }

    #[tokio::test]
    async fn second_login_reuses_account_and_checks_password() {
        let identity = service().await;
        let (first, _) = identity.login("newbie@bis.com", "pw").await.unwrap();
        let (second, _) = identity.login("Newbie@bis.com", "pw").await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(is_invalid_credentials(identity.login("newbie@bis.com", "other").await));
    }

    #[tokio::test]
    async fn seeded_student_keeps_seeded_state() {
        let identity = service().await;
        let (user, _) = identity.login("karim@bis.com", DEMO_PASSWORD).await.unwrap();
        assert_eq!(user.id, "u3");
        assert_eq!(user.subscription, SubscriptionState::Pending);
    }

    #[tokio::test]
    async fn empty_password_is_rejected() {
        let identity = service().await;
        let err = identity.login("karim@bis.com", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn logout_revokes_the_token() {
        let identity = service().await;
        let (_, session) = identity.login("karim@bis.com", DEMO_PASSWORD).await.unwrap();
        identity.logout(&session.token).await.unwrap();
        identity.logout(&session.token).await.unwrap();
        let err = identity.current_user(&session.token).await.unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidToken)));
    }

    #[tokio::test(start_paused = true)]
    async fn login_waits_for_configured_latency() {
        let latency = Duration::from_millis(800);
        let identity = service_with(latency, Some(DEMO_PASSWORD)).await;

        let started = tokio::time::Instant::now();
        let (user, _) = identity.login("karim@bis.com", DEMO_PASSWORD).await.unwrap();
        assert_eq!(user.id, "u3");
        assert!(started.elapsed() >= latency);
    }

    #[tokio::test(start_paused = true)]
    async fn login_abandoned_during_latency_registers_nothing() {
        let identity = service_with(Duration::from_millis(800), Some(DEMO_PASSWORD)).await;

        let attempt = tokio::time::timeout(
            Duration::from_millis(500),
            identity.login("newbie@bis.com", "pw"),
        )
        .await;
        assert!(attempt.is_err());
        assert!(identity.users.find_by_email("newbie@bis.com").await.unwrap().is_none());
    }
}
