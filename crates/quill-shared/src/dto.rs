//! Data Transfer Objects - request/response types for the API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

/// Response to a successful register/login: the session token the client
/// presents back as `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Editable post fields, as submitted to create or edit a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: String,
}

/// A post as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: String,
    pub date: String,
    pub author_id: i32,
}

/// Post detail: the post plus its comments, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// Request to attach a comment to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

/// A comment as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i32,
    pub post_id: i32,
    pub author_id: i32,
    pub body: String,
    pub created_at: String,
}

/// Contact form submission: field name to value, relayed verbatim.
pub type ContactRequest = BTreeMap<String, String>;

/// Outcome of a contact submission. `sent` is false when delivery failed;
/// the endpoint still completes normally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub sent: bool,
    pub message: String,
}
