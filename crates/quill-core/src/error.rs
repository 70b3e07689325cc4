//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
///
/// Validation and uniqueness errors are recoverable by the caller; none of
/// these is treated as process-fatal.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("An account with email {0} already exists")]
    DuplicateUser(String),

    #[error("A post titled {0:?} already exists")]
    DuplicateTitle(String),

    #[error("No account matches that email")]
    UnknownUser,

    #[error("Password does not match")]
    BadCredentials,

    #[error("Login is required")]
    Unauthenticated,

    #[error("Operation requires the admin role")]
    Forbidden,

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Too many login attempts, try again later")]
    TooManyAttempts,

    #[error("Message delivery failed: {0}")]
    Delivery(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::Internal("entity vanished mid-operation".into()),
            RepoError::Constraint(msg) => DomainError::Internal(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}
