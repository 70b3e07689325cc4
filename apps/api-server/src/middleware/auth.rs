//! Authentication extractors.
//!
//! Requests authenticate with `Authorization: Bearer <token>`, where the
//! token was minted by register/login; the extractors resolve it through
//! the server-side session store.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use quill_core::DomainError;
use quill_core::ports::Identity;

use crate::middleware::error::ApiError;
use crate::state::AppState;

/// Pull the bearer token out of the Authorization header, if any.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?;
    let auth_str = value.to_str().ok()?;
    auth_str.strip_prefix("Bearer ").map(str::to_string)
}

async fn resolve_identity(req: &HttpRequest) -> Option<Identity> {
    let state = req.app_data::<web::Data<AppState>>()?;
    let token = bearer_token(req)?;
    state.sessions.get(&token).await
}

/// Authenticated identity extractor.
///
/// Use this in handlers that refuse anonymous requests outright:
/// ```ignore
/// async fn me(user: CurrentUser) -> impl Responder {
///     format!("Hello, user {}!", user.0.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            match resolve_identity(&req).await {
                Some(identity) => Ok(CurrentUser(identity)),
                None => Err(ApiError(DomainError::Unauthenticated)),
            }
        })
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
///
/// Handlers pass the inner option on to the services, which decide
/// between `Unauthenticated` and `Forbidden` per operation.
pub struct OptionalUser(pub Option<Identity>);

impl FromRequest for OptionalUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { Ok(OptionalUser(resolve_identity(&req).await)) })
    }
}
