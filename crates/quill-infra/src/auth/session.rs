//! In-memory session store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::ports::{Identity, SessionError, SessionStore};

struct SessionEntry {
    identity: Identity,
    expires_at: Option<Instant>,
}

/// In-memory session store using a HashMap behind an async RwLock.
///
/// Sessions are process-local and lost on restart; actors simply log in
/// again.
pub struct InMemorySessionStore {
    bindings: RwLock<HashMap<String, SessionEntry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
        }
    }

    fn is_expired(entry: &SessionEntry) -> bool {
        entry
            .expires_at
            .map(|exp| Instant::now() > exp)
            .unwrap_or(false)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(
        &self,
        identity: Identity,
        ttl: Option<Duration>,
    ) -> Result<String, SessionError> {
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = ttl.map(|d| Instant::now() + d);

        let mut bindings = self.bindings.write().await;
        bindings.insert(
            token.clone(),
            SessionEntry {
                identity,
                expires_at,
            },
        );

        Ok(token)
    }

    async fn get(&self, token: &str) -> Option<Identity> {
        let bindings = self.bindings.read().await;
        let entry = bindings.get(token)?;

        if Self::is_expired(entry) {
            drop(bindings);
            // Clean up the expired entry with a write lock
            let mut bindings = self.bindings.write().await;
            bindings.remove(token);
            return None;
        }

        Some(entry.identity.clone())
    }

    async fn destroy(&self, token: &str) -> Result<(), SessionError> {
        let mut bindings = self.bindings.write().await;
        bindings.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::Role;

    fn identity(user_id: i32) -> Identity {
        Identity {
            user_id,
            name: format!("user-{user_id}"),
            role: Role::Member,
        }
    }

    #[tokio::test]
    async fn test_create_and_resolve() {
        let store = InMemorySessionStore::new();
        let token = store.create(identity(2), None).await.unwrap();

        let resolved = store.get(&token).await.unwrap();
        assert_eq!(resolved.user_id, 2);
    }

    #[tokio::test]
    async fn test_tokens_are_unique_per_session() {
        let store = InMemorySessionStore::new();
        let first = store.create(identity(2), None).await.unwrap();
        let second = store.create(identity(2), None).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent() {
        let store = InMemorySessionStore::new();
        let token = store.create(identity(2), None).await.unwrap();

        store.destroy(&token).await.unwrap();
        assert!(store.get(&token).await.is_none());

        store.destroy(&token).await.unwrap();
        store.destroy("never-issued").await.unwrap();
    }

    #[tokio::test]
    async fn test_sessions_expire() {
        let store = InMemorySessionStore::new();
        let token = store
            .create(identity(2), Some(Duration::from_millis(5)))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(store.get(&token).await.is_none());
    }
}
