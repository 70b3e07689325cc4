//! Post and comment handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{Comment, Post, PostDraft};
use quill_shared::dto::{
    CommentRequest, CommentResponse, PostDetailResponse, PostRequest, PostResponse,
};

use crate::middleware::auth::OptionalUser;
use crate::middleware::error::ApiResult;
use crate::state::AppState;

/// GET / - every post, oldest first.
pub async fn list(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let posts = state.content.list_posts().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(post_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /post/{id} - one post plus its comments.
pub async fn detail(state: web::Data<AppState>, path: web::Path<i32>) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let post = state.content.get_post(id).await?;
    let comments = state.content.list_comments(id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(post),
        comments: comments.into_iter().map(comment_response).collect(),
    }))
}

/// POST /post/{id} - attach a comment. Requires a session; anonymous
/// submissions answer 401 so the client can route to login.
pub async fn add_comment(
    state: web::Data<AppState>,
    user: OptionalUser,
    path: web::Path<i32>,
    body: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let comment = state
        .content
        .add_comment(user.0.as_ref(), path.into_inner(), &body.into_inner().body)
        .await?;

    Ok(HttpResponse::Created().json(comment_response(comment)))
}

/// GET /new-post - gate for the compose form. Admin only.
pub async fn compose_gate(state: web::Data<AppState>, user: OptionalUser) -> ApiResult<HttpResponse> {
    state.content.authorize_admin(user.0.as_ref())?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /new-post - create a post. Admin only.
pub async fn create(
    state: web::Data<AppState>,
    user: OptionalUser,
    body: web::Json<PostRequest>,
) -> ApiResult<HttpResponse> {
    let post = state
        .content
        .create_post(user.0.as_ref(), draft(body.into_inner()))
        .await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// GET /edit-post/{id} - gate for the edit form; answers the current
/// field values. Admin only.
pub async fn edit_gate(
    state: web::Data<AppState>,
    user: OptionalUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.content.authorize_admin(user.0.as_ref())?;
    let post = state.content.get_post(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /edit-post/{id} - overwrite the editable fields. Admin only.
pub async fn update(
    state: web::Data<AppState>,
    user: OptionalUser,
    path: web::Path<i32>,
    body: web::Json<PostRequest>,
) -> ApiResult<HttpResponse> {
    let post = state
        .content
        .update_post(user.0.as_ref(), path.into_inner(), draft(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// GET /delete/{id} - delete a post and its comments. Admin only.
pub async fn delete(
    state: web::Data<AppState>,
    user: OptionalUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .content
        .delete_post(user.0.as_ref(), path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

fn draft(req: PostRequest) -> PostDraft {
    PostDraft {
        title: req.title,
        subtitle: req.subtitle,
        body: req.body,
        image_url: req.image_url,
    }
}

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        subtitle: post.subtitle,
        body: post.body,
        image_url: post.image_url,
        date: post.date,
        author_id: post.author_id,
    }
}

fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author_id: comment.author_id,
        body: comment.body,
        created_at: comment.created_at.to_rfc3339(),
    }
}
