//! Rate limiting - used to throttle login attempts.

mod memory;

pub use memory::{InMemoryRateLimiter, RateLimitConfig};
