use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - attached to a post, written by an authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub body: String,
    pub author_id: i32,
    pub post_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Fields transferred when creating a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub body: String,
    pub author_id: i32,
    pub post_id: i32,
}
