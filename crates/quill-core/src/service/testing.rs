//! In-memory port doubles for the service tests.
//!
//! The stores enforce the same uniqueness rules the SQL schema does and
//! report them as [`RepoError::Constraint`], so duplicate-email and
//! duplicate-title behavior surfaces exactly as it would against the real
//! store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Comment, NewComment, NewPost, NewUser, Post, Role, User};
use crate::error::RepoError;
use crate::ports::{
    AuthError, BaseRepository, CommentRepository, HtmlSanitizer, Identity, PasswordService,
    PostRepository, RateLimitError, RateLimitResult, RateLimiter, SessionError, SessionStore,
    UserRepository,
};

pub(crate) fn admin(user_id: i32) -> Identity {
    Identity {
        user_id,
        name: format!("admin-{user_id}"),
        role: Role::Admin,
    }
}

pub(crate) fn member(user_id: i32) -> Identity {
    Identity {
        user_id,
        name: format!("member-{user_id}"),
        role: Role::Member,
    }
}

pub(crate) fn unlimited() -> Arc<dyn RateLimiter> {
    Arc::new(CountingLimiter::new(u32::MAX))
}

// ---------------------------------------------------------------------------
// Repositories

#[derive(Default)]
pub(crate) struct MemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl MemoryUsers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn count_with_email(&self, email: &str) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email == email)
            .count()
    }
}

#[async_trait]
impl BaseRepository<User, i32> for MemoryUsers {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("users.email".to_string()));
        }
        let id = rows.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let row = User {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[derive(Default)]
pub(crate) struct MemoryPosts {
    rows: Mutex<Vec<Post>>,
}

impl MemoryPosts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for MemoryPosts {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryPosts {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|p| p.title == post.title) {
            return Err(RepoError::Constraint("posts.title".to_string()));
        }
        let id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        let row = Post {
            id,
            title: post.title,
            subtitle: post.subtitle,
            body: post.body,
            image_url: post.image_url,
            date: post.date,
            author_id: post.author_id,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|p| p.id != post.id && p.title == post.title)
        {
            return Err(RepoError::Constraint("posts.title".to_string()));
        }
        let slot = rows
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        let mut updated = post;
        updated.updated_at = Utc::now();
        *slot = updated.clone();
        Ok(updated)
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by_key(|p| p.id);
        Ok(rows)
    }
}

#[derive(Default)]
pub(crate) struct MemoryComments {
    rows: Mutex<Vec<Comment>>,
}

impl MemoryComments {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl BaseRepository<Comment, i32> for MemoryComments {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryComments {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let row = Comment {
            id,
            body: comment.body,
            author_id: comment.author_id,
            post_id: comment.post_id,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_by_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let mut rows: Vec<Comment> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.id);
        Ok(rows)
    }

    async fn delete_by_post(&self, post_id: i32) -> Result<u64, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.post_id != post_id);
        Ok((before - rows.len()) as u64)
    }
}

// ---------------------------------------------------------------------------
// Auth collaborators

/// Reversible stand-in for the password hasher; the real Argon2
/// implementation is tested in the infra crate.
pub(crate) struct PlainHasher;

impl PasswordService for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("h#{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("h#{password}"))
    }
}

pub(crate) struct MemorySessions {
    bindings: Mutex<HashMap<String, Identity>>,
    counter: AtomicU32,
}

impl MemorySessions {
    pub(crate) fn new() -> Self {
        Self {
            bindings: Mutex::new(HashMap::new()),
            counter: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn create(
        &self,
        identity: Identity,
        _ttl: Option<Duration>,
    ) -> Result<String, SessionError> {
        let token = format!("tok-{}", self.counter.fetch_add(1, Ordering::Relaxed));
        self.bindings.lock().unwrap().insert(token.clone(), identity);
        Ok(token)
    }

    async fn get(&self, token: &str) -> Option<Identity> {
        self.bindings.lock().unwrap().get(token).cloned()
    }

    async fn destroy(&self, token: &str) -> Result<(), SessionError> {
        self.bindings.lock().unwrap().remove(token);
        Ok(())
    }
}

/// Allows the first `max` checks per key, then denies.
pub(crate) struct CountingLimiter {
    max: u32,
    seen: Mutex<HashMap<String, u32>>,
}

impl CountingLimiter {
    pub(crate) fn new(max: u32) -> Self {
        Self {
            max,
            seen: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RateLimiter for CountingLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        let mut seen = self.seen.lock().unwrap();
        let count = seen.entry(key.to_string()).or_insert(0);
        *count += 1;
        Ok(RateLimitResult {
            allowed: *count <= self.max,
            remaining: self.max.saturating_sub(*count),
            reset_after: Duration::ZERO,
        })
    }
}

// ---------------------------------------------------------------------------
// Content collaborators

/// Tags its input so tests can prove the sanitizer ran; the real allow-list
/// implementation is tested in the infra crate.
pub(crate) struct MarkingSanitizer;

impl HtmlSanitizer for MarkingSanitizer {
    fn sanitize(&self, raw_html: &str) -> String {
        format!("[sanitized]{raw_html}")
    }
}
