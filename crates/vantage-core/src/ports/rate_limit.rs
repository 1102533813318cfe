//! Rate limiting port.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::RateLimitPolicy;

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests left in the current window after this one.
    pub remaining: u32,
    /// Time until the window resets; usable as a retry hint on denial.
    pub reset_after: Duration,
}

/// Keyed request limiter.
///
/// Checks are in-memory and infallible - there is no external I/O to fail.
/// Implementations must treat the check and the counter increment as one
/// atomic unit per key; the increment happens only once the allow decision
/// is finalized, never speculatively.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn allow(&self, key: &str, policy: &RateLimitPolicy) -> RateLimitDecision;
}
