//! Registration, login and session management.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{NewUser, Role, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{Identity, PasswordService, RateLimiter, SessionStore, UserRepository};

/// An established session: the opaque token plus the user it is bound to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Auth service - registers and authenticates users, owns session identity.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    sessions: Arc<dyn SessionStore>,
    login_throttle: Arc<dyn RateLimiter>,
    admin_email: Option<String>,
    session_ttl: Option<Duration>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        sessions: Arc<dyn SessionStore>,
        login_throttle: Arc<dyn RateLimiter>,
        admin_email: Option<String>,
        session_ttl: Option<Duration>,
    ) -> Self {
        Self {
            users,
            passwords,
            sessions,
            login_throttle,
            admin_email,
            session_ttl,
        }
    }

    /// Register a new account and log it in.
    ///
    /// Fails with [`DomainError::DuplicateUser`] when the email is taken, so
    /// the caller can route the actor to login instead.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, DomainError> {
        // Validate input
        if name.trim().is_empty() {
            return Err(DomainError::Validation("Name is required".to_string()));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation(
                "Invalid email address".to_string(),
            ));
        }
        if password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        // Friendly pre-check; the store constraint still backs this up
        // against concurrent registrations.
        if self.users.find_by_email(email).await?.is_some() {
            return Err(DomainError::DuplicateUser(email.to_string()));
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let role = self.role_for(email);
        let user = self
            .users
            .create(NewUser {
                name: name.trim().to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => DomainError::DuplicateUser(email.to_string()),
                other => other.into(),
            })?;

        self.open_session(user).await
    }

    /// Authenticate against stored credentials and establish a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let throttle = self
            .login_throttle
            .check(email)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !throttle.allowed {
            return Err(DomainError::TooManyAttempts);
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::UnknownUser)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            return Err(DomainError::BadCredentials);
        }

        self.open_session(user).await
    }

    /// Clear the session bound to `token`. Idempotent; an unknown or
    /// already-cleared token is a no-op.
    pub async fn logout(&self, token: &str) -> Result<(), DomainError> {
        self.sessions
            .destroy(token)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// The identity bound to `token`, or none.
    pub async fn identity(&self, token: &str) -> Option<Identity> {
        self.sessions.get(token).await
    }

    async fn open_session(&self, user: User) -> Result<Session, DomainError> {
        let token = self
            .sessions
            .create(Identity::from(&user), self.session_ttl)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(Session { token, user })
    }

    fn role_for(&self, email: &str) -> Role {
        match &self.admin_email {
            Some(admin) if admin == email => Role::Admin,
            _ => Role::Member,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{
        CountingLimiter, MemorySessions, MemoryUsers, PlainHasher, unlimited,
    };

    fn service_with(users: Arc<MemoryUsers>, admin_email: Option<&str>) -> AuthService {
        AuthService::new(
            users,
            Arc::new(PlainHasher),
            Arc::new(MemorySessions::new()),
            unlimited(),
            admin_email.map(str::to_string),
            None,
        )
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let users = Arc::new(MemoryUsers::new());
        let auth = service_with(users.clone(), None);

        auth.register("Ann", "ann@example.com", "password123")
            .await
            .unwrap();
        let err = auth
            .register("Another Ann", "ann@example.com", "different-pass")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::DuplicateUser(_)));
        assert_eq!(users.count_with_email("ann@example.com"), 1);
    }

    #[tokio::test]
    async fn register_validates_input() {
        let auth = service_with(Arc::new(MemoryUsers::new()), None);

        let err = auth.register("Ann", "not-an-email", "password123").await;
        assert!(matches!(err, Err(DomainError::Validation(_))));

        let err = auth.register("Ann", "ann@example.com", "short").await;
        assert!(matches!(err, Err(DomainError::Validation(_))));

        let err = auth.register("  ", "ann@example.com", "password123").await;
        assert!(matches!(err, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn login_distinguishes_unknown_user_from_bad_password() {
        let auth = service_with(Arc::new(MemoryUsers::new()), None);
        auth.register("Ann", "ann@example.com", "password123")
            .await
            .unwrap();

        let err = auth.login("nobody@example.com", "password123").await;
        assert!(matches!(err, Err(DomainError::UnknownUser)));

        let err = auth.login("ann@example.com", "wrong-password").await;
        assert!(matches!(err, Err(DomainError::BadCredentials)));
    }

    #[tokio::test]
    async fn login_binds_session_to_the_matched_user() {
        let auth = service_with(Arc::new(MemoryUsers::new()), None);
        let registered = auth
            .register("Ann", "ann@example.com", "password123")
            .await
            .unwrap();

        let session = auth.login("ann@example.com", "password123").await.unwrap();
        assert_eq!(session.user.id, registered.user.id);

        let identity = auth.identity(&session.token).await.unwrap();
        assert_eq!(identity.user_id, registered.user.id);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let auth = service_with(Arc::new(MemoryUsers::new()), None);
        let session = auth
            .register("Ann", "ann@example.com", "password123")
            .await
            .unwrap();

        auth.logout(&session.token).await.unwrap();
        assert!(auth.identity(&session.token).await.is_none());

        // Second logout with the same (now dead) token is a no-op.
        auth.logout(&session.token).await.unwrap();
        // And so is logging out with no session at all.
        auth.logout("never-issued").await.unwrap();
    }

    #[tokio::test]
    async fn admin_email_registration_gets_the_admin_role() {
        let auth = service_with(Arc::new(MemoryUsers::new()), Some("boss@example.com"));

        let admin = auth
            .register("Boss", "boss@example.com", "password123")
            .await
            .unwrap();
        let member = auth
            .register("Ann", "ann@example.com", "password123")
            .await
            .unwrap();

        assert_eq!(admin.user.role, Role::Admin);
        assert_eq!(member.user.role, Role::Member);
    }

    #[tokio::test]
    async fn login_attempts_are_throttled_per_email() {
        let users = Arc::new(MemoryUsers::new());
        let auth = AuthService::new(
            users,
            Arc::new(PlainHasher),
            Arc::new(MemorySessions::new()),
            Arc::new(CountingLimiter::new(2)),
            None,
            None,
        );
        auth.register("Ann", "ann@example.com", "password123")
            .await
            .unwrap();

        // Registration does not consume login attempts.
        assert!(auth.login("ann@example.com", "nope-nope").await.is_err());
        assert!(auth.login("ann@example.com", "nope-nope").await.is_err());
        let err = auth.login("ann@example.com", "password123").await;
        assert!(matches!(err, Err(DomainError::TooManyAttempts)));
    }
}
