//! SeaORM repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use quill_core::domain::{Comment, NewComment, NewPost, NewUser, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::sql_base::SqlBaseRepository;

/// SQL user repository.
pub type SqlUserRepository = SqlBaseRepository<UserEntity>;

/// SQL post repository.
pub type SqlPostRepository = SqlBaseRepository<PostEntity>;

/// SQL comment repository.
pub type SqlCommentRepository = SqlBaseRepository<CommentEntity>;

/// Map a write error, surfacing unique-index violations as constraint
/// errors so the services can turn them into domain duplicates.
fn write_error(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    let lowered = err_str.to_lowercase();
    if lowered.contains("unique") || lowered.contains("duplicate") {
        RepoError::Constraint(err_str)
    } else {
        RepoError::Query(err_str)
    }
}

/// Mask the local part of an email so logs carry no PII.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            if local.len() > 1 {
                format!("{}***{}", &local[..1], domain)
            } else {
                format!("***{domain}")
            }
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.insert(self.db.as_ref()).await.map_err(write_error)?;
        Ok(model.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let active: post::ActiveModel = post.into();
        let model = active.insert(self.db.as_ref()).await.map_err(write_error)?;
        Ok(model.into())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let active: post::ActiveModel = post.into();
        let model = active.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => write_error(other),
        })?;
        Ok(model.into())
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for SqlCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let active: comment::ActiveModel = new_comment.into();
        let model = active.insert(self.db.as_ref()).await.map_err(write_error)?;
        Ok(model.into())
    }

    async fn list_by_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete_by_post(&self, post_id: i32) -> Result<u64, RepoError> {
        let result = CommentEntity::delete_many()
            .filter(comment::Column::PostId.eq(post_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected)
    }
}
