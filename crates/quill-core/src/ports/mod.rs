//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod mailer;
mod rate_limit;
mod repository;
mod sanitizer;
mod session;

pub use auth::{AuthError, PasswordService};
pub use mailer::{ContactFields, MailError, Mailer};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{BaseRepository, CommentRepository, PostRepository, UserRepository};
pub use sanitizer::HtmlSanitizer;
pub use session::{Identity, SessionError, SessionStore};
