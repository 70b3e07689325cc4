//! Post entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use quill_core::domain::NewPost;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    pub subtitle: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub image_url: String,
    pub date: String,
    pub author_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            subtitle: model.subtitle,
            body: model.body,
            image_url: model.image_url,
            date: model.date,
            author_id: model.author_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from a creation draft to an ActiveModel; the store assigns
/// the id.
impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: NotSet,
            title: Set(post.title),
            subtitle: Set(post.subtitle),
            body: Set(post.body),
            image_url: Set(post.image_url),
            date: Set(post.date),
            author_id: Set(post.author_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

/// Conversion from an existing Domain Post, used for in-place updates.
impl From<quill_core::domain::Post> for ActiveModel {
    fn from(post: quill_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            subtitle: Set(post.subtitle),
            body: Set(post.body),
            image_url: Set(post.image_url),
            date: Set(post.date),
            author_id: Set(post.author_id),
            created_at: Set(post.created_at.into()),
            updated_at: Set(Utc::now().into()),
        }
    }
}
