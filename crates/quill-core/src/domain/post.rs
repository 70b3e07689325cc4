use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a published blog article.
///
/// `body` holds sanitized HTML only; `date` is the human-readable display
/// string stamped when the post was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: String,
    pub date: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable fields as submitted by the author, before validation and
/// sanitization.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: String,
}

/// Fields transferred when creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: String,
    pub date: String,
    pub author_id: i32,
}
