use async_trait::async_trait;

use crate::domain::{Comment, NewComment, NewPost, NewUser, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining the operations every entity supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with [`RepoError::NotFound`] when
    /// nothing was deleted.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
///
/// `create` must surface a store-level unique violation on `email` as
/// [`RepoError::Constraint`]; two concurrent registrations with the same
/// email must not both succeed.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Persist a new user; the store assigns the id.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository. `create` surfaces a `title` unique violation as
/// [`RepoError::Constraint`].
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Persist a new post; the store assigns the id.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite an existing post in place.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Every post, in insertion (id) order.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i32> {
    /// Persist a new comment; the store assigns the id.
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    /// Comments attached to a post, in insertion (id) order.
    async fn list_by_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError>;

    /// Remove every comment attached to a post; returns how many went away.
    async fn delete_by_post(&self, post_id: i32) -> Result<u64, RepoError>;
}
