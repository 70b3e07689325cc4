//! Error translation - domain errors become RFC 7807 responses.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use quill_core::DomainError;
use quill_shared::ErrorResponse;

/// Boundary wrapper that maps the domain taxonomy onto HTTP.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::UnknownUser
            | DomainError::BadCredentials
            | DomainError::Unauthenticated => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::DuplicateUser(_) | DomainError::DuplicateTitle(_) => StatusCode::CONFLICT,
            DomainError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            DomainError::Delivery(_) => StatusCode::BAD_GATEWAY,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match &self.0 {
            DomainError::Validation(msg) => ErrorResponse::bad_request(msg.clone()),
            // Which half of the credential pair was wrong stays server-side.
            DomainError::UnknownUser | DomainError::BadCredentials => {
                ErrorResponse::unauthorized("Invalid email or password")
            }
            DomainError::Unauthenticated => ErrorResponse::unauthorized("Login is required"),
            DomainError::Forbidden => ErrorResponse::forbidden(),
            DomainError::NotFound { .. } => ErrorResponse::not_found(self.0.to_string()),
            DomainError::DuplicateUser(_) | DomainError::DuplicateTitle(_) => {
                ErrorResponse::conflict(self.0.to_string())
            }
            DomainError::TooManyAttempts => ErrorResponse::too_many_requests(),
            DomainError::Delivery(msg) => ErrorResponse::bad_gateway(msg.clone()),
            DomainError::Internal(msg) => {
                // Log internal errors; the body stays generic
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_maps_to_expected_status_codes() {
        let cases = [
            (DomainError::Validation("x".into()), 400),
            (DomainError::UnknownUser, 401),
            (DomainError::BadCredentials, 401),
            (DomainError::Unauthenticated, 401),
            (DomainError::Forbidden, 403),
            (
                DomainError::NotFound {
                    entity: "post",
                    id: 1,
                },
                404,
            ),
            (DomainError::DuplicateUser("a@b.c".into()), 409),
            (DomainError::DuplicateTitle("t".into()), 409),
            (DomainError::TooManyAttempts, 429),
            (DomainError::Delivery("x".into()), 502),
            (DomainError::Internal("x".into()), 500),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError(err).status_code().as_u16(), status);
        }
    }
}
