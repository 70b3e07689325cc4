//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use quill_infra::database::DatabaseConfig;
use quill_infra::mail::MailConfig;
use quill_infra::rate_limit::RateLimitConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Registrations with this email receive the admin role.
    pub admin_email: Option<String>,
    pub session_ttl: Option<Duration>,
    pub login_throttle: RateLimitConfig,
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let db_defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or(db_defaults.url),
            max_connections: parse_env("DB_MAX_CONNECTIONS", db_defaults.max_connections),
            min_connections: parse_env("DB_MIN_CONNECTIONS", db_defaults.min_connections),
        };

        let throttle_defaults = RateLimitConfig::default();
        let login_throttle = RateLimitConfig {
            max_attempts: parse_env("LOGIN_MAX_ATTEMPTS", throttle_defaults.max_attempts),
            window: Duration::from_secs(parse_env(
                "LOGIN_WINDOW_SECS",
                throttle_defaults.window.as_secs(),
            )),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_env("PORT", 8080),
            database,
            admin_email: env::var("ADMIN_EMAIL").ok(),
            session_ttl: Some(Duration::from_secs(
                parse_env("SESSION_TTL_MINUTES", 1440u64) * 60,
            )),
            login_throttle,
            mail: Self::mail_from_env(),
        }
    }

    /// Mail settings are all-or-nothing; with any of them missing the relay
    /// is disabled and the contact endpoint reports delivery failure.
    fn mail_from_env() -> Option<MailConfig> {
        let smtp_host = env::var("MAIL_SMTP_HOST").ok()?;
        let username = env::var("MAIL_USERNAME").ok()?;
        let password = env::var("MAIL_PASSWORD").ok()?;
        let recipient = env::var("MAIL_RECIPIENT").ok()?;
        let from = env::var("MAIL_FROM").unwrap_or_else(|_| username.clone());

        Some(MailConfig {
            smtp_host,
            username,
            password,
            from,
            recipient,
        })
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
