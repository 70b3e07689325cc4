//! Post and comment operations, with the ownership/role rules enforced here
//! so every caller shares a single gate.

use std::sync::Arc;

use chrono::Utc;
use url::Url;

use crate::domain::{Comment, NewComment, NewPost, Post, PostDraft};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, HtmlSanitizer, Identity, PostRepository};

/// Display format for a post's creation date, e.g. "August 06, 2026".
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// Content service - CRUD for posts and comments.
#[derive(Clone)]
pub struct ContentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    sanitizer: Arc<dyn HtmlSanitizer>,
}

impl ContentService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        sanitizer: Arc<dyn HtmlSanitizer>,
    ) -> Self {
        Self {
            posts,
            comments,
            sanitizer,
        }
    }

    /// Every post, oldest first. No pagination.
    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list().await?)
    }

    pub async fn get_post(&self, id: i32) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "post", id })
    }

    /// Create a post. Admin only; the body is sanitized before it is
    /// persisted and the display date is stamped here.
    pub async fn create_post(
        &self,
        actor: Option<&Identity>,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let actor = Self::require_admin(actor)?;
        Self::validate_draft(&draft)?;

        let title = draft.title.trim().to_string();
        self.posts
            .create(NewPost {
                title: title.clone(),
                subtitle: draft.subtitle.trim().to_string(),
                body: self.sanitizer.sanitize(&draft.body),
                image_url: draft.image_url,
                date: Utc::now().format(DATE_FORMAT).to_string(),
                author_id: actor.user_id,
            })
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => DomainError::DuplicateTitle(title),
                other => other.into(),
            })
    }

    /// Overwrite the editable fields of an existing post. Admin only; the
    /// id, author and display date are not changed by this operation.
    pub async fn update_post(
        &self,
        actor: Option<&Identity>,
        id: i32,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        Self::require_admin(actor)?;
        Self::validate_draft(&draft)?;

        let mut post = self.get_post(id).await?;
        let title = draft.title.trim().to_string();
        post.title = title.clone();
        post.subtitle = draft.subtitle.trim().to_string();
        post.body = self.sanitizer.sanitize(&draft.body);
        post.image_url = draft.image_url;

        self.posts.update(post).await.map_err(|e| match e {
            RepoError::Constraint(_) => DomainError::DuplicateTitle(title),
            RepoError::NotFound => DomainError::NotFound { entity: "post", id },
            other => other.into(),
        })
    }

    /// Delete a post and, with it, every attached comment.
    pub async fn delete_post(&self, actor: Option<&Identity>, id: i32) -> Result<(), DomainError> {
        Self::require_admin(actor)?;

        // Resolve the post first so a miss reads as 404, not a silent no-op.
        self.get_post(id).await?;

        self.comments.delete_by_post(id).await?;
        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::NotFound { entity: "post", id },
            other => other.into(),
        })
    }

    /// Attach a comment to a post. Requires an authenticated actor of any
    /// role; anonymous comments are rejected.
    pub async fn add_comment(
        &self,
        actor: Option<&Identity>,
        post_id: i32,
        body: &str,
    ) -> Result<Comment, DomainError> {
        let actor = actor.ok_or(DomainError::Unauthenticated)?;
        if body.trim().is_empty() {
            return Err(DomainError::Validation("Comment is required".to_string()));
        }

        self.get_post(post_id).await?;

        Ok(self
            .comments
            .create(NewComment {
                body: self.sanitizer.sanitize(body),
                author_id: actor.user_id,
                post_id,
            })
            .await?)
    }

    /// Comments attached to a post, oldest first.
    pub async fn list_comments(&self, post_id: i32) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.list_by_post(post_id).await?)
    }

    /// The bare capability check, for routes that gate a form rather than a
    /// mutation.
    pub fn authorize_admin(&self, actor: Option<&Identity>) -> Result<(), DomainError> {
        Self::require_admin(actor).map(|_| ())
    }

    fn require_admin(actor: Option<&Identity>) -> Result<&Identity, DomainError> {
        match actor {
            Some(identity) if identity.is_admin() => Ok(identity),
            _ => Err(DomainError::Forbidden),
        }
    }

    fn validate_draft(draft: &PostDraft) -> Result<(), DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::Validation("Title is required".to_string()));
        }
        if draft.subtitle.trim().is_empty() {
            return Err(DomainError::Validation("Subtitle is required".to_string()));
        }
        if draft.body.trim().is_empty() {
            return Err(DomainError::Validation("Body is required".to_string()));
        }
        if Url::parse(&draft.image_url).is_err() {
            return Err(DomainError::Validation(
                "Image URL must be a valid URL".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::service::testing::{
        MarkingSanitizer, MemoryComments, MemoryPosts, MemorySessions, MemoryUsers, PlainHasher,
        admin, member, unlimited,
    };
    use crate::service::AuthService;

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            subtitle: "A subtitle".to_string(),
            body: "<p>Hello</p>".to_string(),
            image_url: "https://example.com/cover.jpg".to_string(),
        }
    }

    fn service() -> (ContentService, Arc<MemoryPosts>, Arc<MemoryComments>) {
        let posts = Arc::new(MemoryPosts::new());
        let comments = Arc::new(MemoryComments::new());
        let content = ContentService::new(
            posts.clone(),
            comments.clone(),
            Arc::new(MarkingSanitizer),
        );
        (content, posts, comments)
    }

    #[tokio::test]
    async fn create_post_requires_the_admin_role() {
        let (content, posts, _) = service();

        let err = content.create_post(Some(&member(7)), draft("First")).await;
        assert!(matches!(err, Err(DomainError::Forbidden)));

        let err = content.create_post(None, draft("First")).await;
        assert!(matches!(err, Err(DomainError::Forbidden)));

        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn create_post_stamps_date_and_sanitizes_body() {
        let (content, _, _) = service();

        let mut d = draft("First");
        d.body = "<script>alert(1)</script><b>hi</b>".to_string();
        let post = content.create_post(Some(&admin(1)), d).await.unwrap();

        assert_eq!(post.date, Utc::now().format(DATE_FORMAT).to_string());
        assert_eq!(
            post.body,
            MarkingSanitizer.sanitize("<script>alert(1)</script><b>hi</b>")
        );
        assert_eq!(post.author_id, 1);
    }

    #[tokio::test]
    async fn create_post_rejects_duplicate_titles() {
        let (content, posts, _) = service();

        content
            .create_post(Some(&admin(1)), draft("First"))
            .await
            .unwrap();
        let err = content.create_post(Some(&admin(1)), draft("First")).await;

        assert!(matches!(err, Err(DomainError::DuplicateTitle(_))));
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn create_post_validates_fields() {
        let (content, _, _) = service();

        let mut d = draft("First");
        d.image_url = "not a url".to_string();
        let err = content.create_post(Some(&admin(1)), d).await;
        assert!(matches!(err, Err(DomainError::Validation(_))));

        let mut d = draft("  ");
        d.title = "  ".to_string();
        let err = content.create_post(Some(&admin(1)), d).await;
        assert!(matches!(err, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn update_post_preserves_id_author_and_date() {
        let (content, _, _) = service();
        let created = content
            .create_post(Some(&admin(1)), draft("First"))
            .await
            .unwrap();

        let updated = content
            .update_post(Some(&admin(1)), created.id, draft("Renamed"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.author_id, created.author_id);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.title, "Renamed");
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let (content, _, _) = service();
        let err = content.update_post(Some(&admin(1)), 99, draft("X")).await;
        assert!(matches!(err, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn delete_post_cascades_to_its_comments() {
        let (content, _, comments) = service();
        let post = content
            .create_post(Some(&admin(1)), draft("First"))
            .await
            .unwrap();
        content
            .add_comment(Some(&member(2)), post.id, "nice post")
            .await
            .unwrap();
        content
            .add_comment(Some(&member(3)), post.id, "agreed")
            .await
            .unwrap();

        content.delete_post(Some(&admin(1)), post.id).await.unwrap();

        let err = content.get_post(post.id).await;
        assert!(matches!(err, Err(DomainError::NotFound { .. })));
        assert!(content.list_comments(post.id).await.unwrap().is_empty());
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn add_comment_requires_a_session() {
        let (content, _, comments) = service();
        let post = content
            .create_post(Some(&admin(1)), draft("First"))
            .await
            .unwrap();

        let err = content.add_comment(None, post.id, "anonymous!").await;

        assert!(matches!(err, Err(DomainError::Unauthenticated)));
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn add_comment_to_missing_post_is_not_found() {
        let (content, _, _) = service();
        let err = content.add_comment(Some(&member(2)), 41, "hello?").await;
        assert!(matches!(err, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn authorize_admin_gates_the_form_routes() {
        let (content, _, _) = service();

        assert!(content.authorize_admin(Some(&admin(1))).is_ok());
        assert!(matches!(
            content.authorize_admin(Some(&member(2))),
            Err(DomainError::Forbidden)
        ));
        assert!(matches!(
            content.authorize_admin(None),
            Err(DomainError::Forbidden)
        ));
    }

    /// Register -> login -> comment on a post, end to end across both
    /// services.
    #[tokio::test]
    async fn registered_user_can_comment_after_login() {
        let users = Arc::new(MemoryUsers::new());
        let sessions = Arc::new(MemorySessions::new());
        let auth = AuthService::new(
            users,
            Arc::new(PlainHasher),
            sessions,
            unlimited(),
            Some("boss@example.com".to_string()),
            None,
        );
        let (content, _, _) = service();

        let boss = auth
            .register("Boss", "boss@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(boss.user.role, Role::Admin);
        let post = content
            .create_post(Some(&Identity::from(&boss.user)), draft("Post one"))
            .await
            .unwrap();

        auth.register("Ann", "ann@example.com", "password123")
            .await
            .unwrap();
        let session = auth.login("ann@example.com", "password123").await.unwrap();
        let identity = auth.identity(&session.token).await.unwrap();

        content
            .add_comment(Some(&identity), post.id, "nice post")
            .await
            .unwrap();

        let comments = content.list_comments(post.id).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author_id, session.user.id);
        assert_eq!(
            comments[0].body,
            MarkingSanitizer.sanitize("nice post")
        );
    }
}
