//! Account handlers: register, login, logout, current identity.

use actix_web::{HttpRequest, HttpResponse, web};

use quill_core::domain::User;
use quill_core::service::Session;
use quill_shared::dto::{LoginRequest, RegisterRequest, SessionResponse, UserResponse};

use crate::middleware::auth::{CurrentUser, bearer_token};
use crate::middleware::error::ApiResult;
use crate::state::AppState;

/// POST /register
///
/// A duplicate email answers 409 so the client can route the actor to
/// login instead.
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    let session = state
        .auth
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok(HttpResponse::Created().json(session_response(session)))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    let session = state.auth.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(session_response(session)))
}

/// GET /logout
///
/// Clears the calling session unconditionally; a request with no (or a
/// dead) token is a no-op.
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    if let Some(token) = bearer_token(&req) {
        state.auth.logout(&token).await?;
    }

    Ok(HttpResponse::NoContent().finish())
}

/// GET /me - identity bound to the calling session.
pub async fn me(user: CurrentUser) -> ApiResult<HttpResponse> {
    let identity = user.0;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user_id": identity.user_id,
        "name": identity.name,
        "role": identity.role,
    })))
}

fn session_response(session: Session) -> SessionResponse {
    SessionResponse {
        token: session.token,
        user: user_response(session.user),
    }
}

fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role.as_str().to_string(),
        created_at: user.created_at.to_rfc3339(),
    }
}
