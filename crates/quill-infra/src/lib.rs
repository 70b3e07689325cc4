//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! SeaORM repositories, Argon2 password hashing, the in-memory session
//! store, the login throttle, the ammonia HTML sanitizer, and the SMTP
//! mail relay.

pub mod auth;
pub mod database;
pub mod mail;
pub mod rate_limit;
pub mod sanitize;

pub use auth::{Argon2PasswordService, InMemorySessionStore};
pub use database::{DatabaseConfig, SqlCommentRepository, SqlPostRepository, SqlUserRepository};
pub use mail::{DisabledMailer, MailConfig, SmtpMailer};
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
pub use sanitize::AllowListSanitizer;
