//! Application state - shared across all handlers.
//!
//! Everything is constructed once here and injected into the services;
//! there are no ambient globals.

use std::sync::Arc;

use quill_core::ports::{Mailer, SessionStore};
use quill_core::service::{AuthService, ContentService};
use quill_infra::auth::{Argon2PasswordService, InMemorySessionStore};
use quill_infra::database::{self, SqlCommentRepository, SqlPostRepository, SqlUserRepository};
use quill_infra::mail::{DisabledMailer, SmtpMailer};
use quill_infra::rate_limit::InMemoryRateLimiter;
use quill_infra::sanitize::AllowListSanitizer;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub content: ContentService,
    pub mailer: Arc<dyn Mailer>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Connect to the store and wire up the services.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db = Arc::new(database::connect(&config.database).await?);

        let users = Arc::new(SqlUserRepository::new(db.clone()));
        let posts = Arc::new(SqlPostRepository::new(db.clone()));
        let comments = Arc::new(SqlCommentRepository::new(db));

        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

        let auth = AuthService::new(
            users,
            Arc::new(Argon2PasswordService::new()),
            sessions.clone(),
            Arc::new(InMemoryRateLimiter::new(config.login_throttle.clone())),
            config.admin_email.clone(),
            config.session_ttl,
        );

        let content = ContentService::new(posts, comments, Arc::new(AllowListSanitizer::new()));

        let mailer: Arc<dyn Mailer> = match &config.mail {
            Some(mail_config) => Arc::new(SmtpMailer::new(mail_config)?),
            None => {
                tracing::warn!("MAIL_* not set. Contact messages will not be delivered.");
                Arc::new(DisabledMailer)
            }
        };

        tracing::info!("Application state initialized");

        Ok(Self {
            auth,
            content,
            mailer,
            sessions,
        })
    }
}
