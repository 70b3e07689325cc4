//! Contact form handler.

use actix_web::{HttpResponse, web};

use quill_core::DomainError;
use quill_shared::dto::{ContactRequest, ContactResponse};

use crate::middleware::error::ApiResult;
use crate::state::AppState;

/// POST /contact - relay the submitted fields to the fixed recipient.
///
/// A delivery failure is caught here: the endpoint still answers a
/// completion state, never a server error.
pub async fn submit(
    state: web::Data<AppState>,
    body: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let fields = body.into_inner();
    if fields.is_empty() {
        return Err(DomainError::Validation("At least one field is required".to_string()).into());
    }

    let response = match state.mailer.send(&fields).await {
        Ok(()) => ContactResponse {
            sent: true,
            message: "Message sent".to_string(),
        },
        Err(e) => {
            tracing::warn!("Contact delivery failed: {}", e);
            ContactResponse {
                sent: false,
                message: "Message could not be delivered".to_string(),
            }
        }
    };

    Ok(HttpResponse::Ok().json(response))
}
