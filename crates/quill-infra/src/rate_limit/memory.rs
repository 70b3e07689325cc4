//! In-memory keyed rate limiter using the governor crate.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter as GovernorRateLimiter};

use quill_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

type KeyedRateLimiter = GovernorRateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Rate limiter configuration. The default suits login throttling: a
/// handful of attempts per minute, per key.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum attempts per window.
    pub max_attempts: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(60),
        }
    }
}

/// In-memory keyed rate limiter using the GCRA algorithm.
///
/// Each key (the auth service passes the login email) gets its own
/// budget. Limits are per-process, not distributed across instances.
pub struct InMemoryRateLimiter {
    limiter: KeyedRateLimiter,
    config: RateLimitConfig,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let quota = Quota::with_period(config.window / config.max_attempts)
            .expect("Valid quota")
            .allow_burst(NonZeroU32::new(config.max_attempts).expect("Non-zero"));

        Self {
            limiter: KeyedRateLimiter::keyed(quota),
            config,
        }
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        match self.limiter.check_key(&key.to_string()) {
            Ok(_) => Ok(RateLimitResult {
                allowed: true,
                remaining: self.config.max_attempts, // Approximate
                reset_after: self.config.window,
            }),
            Err(not_until) => Ok(RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_after: not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                )),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_budget_is_exhausted_per_key() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_attempts: 2,
            window: Duration::from_secs(3600),
        });

        assert!(limiter.check("ann@example.com").await.unwrap().allowed);
        assert!(limiter.check("ann@example.com").await.unwrap().allowed);
        assert!(!limiter.check("ann@example.com").await.unwrap().allowed);

        // A different key has its own budget.
        assert!(limiter.check("bob@example.com").await.unwrap().allowed);
    }
}
