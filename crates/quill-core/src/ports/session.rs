//! Session port - the server-side binding of a token to an authenticated user.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Role, User};

/// The identity a session resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i32,
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Session store - abstraction over the session backend.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Bind an identity to a fresh opaque token, valid for `ttl` when given.
    async fn create(
        &self,
        identity: Identity,
        ttl: Option<Duration>,
    ) -> Result<String, SessionError>;

    /// Resolve a token to its identity, if the session is still live.
    async fn get(&self, token: &str) -> Option<Identity>;

    /// Drop a session. Destroying an unknown token is a no-op.
    async fn destroy(&self, token: &str) -> Result<(), SessionError>;
}

/// Session backend errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session backend error: {0}")]
    Backend(String),
}
