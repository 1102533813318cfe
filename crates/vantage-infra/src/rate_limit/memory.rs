//! Keyed fixed-window rate limiter.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use vantage_core::domain::RateLimitPolicy;
use vantage_core::ports::{RateLimitDecision, RateLimiter};

struct WindowSlot {
    count: u32,
    reset_at: Instant,
}

/// In-memory fixed-window limiter keyed by caller identifier.
///
/// Exactly `max_requests` requests are admitted per window; the next one is
/// refused until the window resets. Expired slots are discarded lazily on
/// access - there is no background sweep, so a key that never comes back
/// keeps its slot for the life of the process (bounded by key cardinality).
///
/// The check and the increment run under one mutex, which is what keeps the
/// quota exact under concurrent load. The critical section is a map lookup
/// and an integer bump; nothing awaits while the lock is held, and the
/// counter only moves once the allow decision is final.
pub struct FixedWindowLimiter {
    windows: Mutex<HashMap<String, WindowSlot>>,
}

impl FixedWindowLimiter {
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for FixedWindowLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimiter for FixedWindowLimiter {
    async fn allow(&self, key: &str, policy: &RateLimitPolicy) -> RateLimitDecision {
        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        let slot = windows
            .entry(key.to_string())
            .and_modify(|slot| {
                if slot.reset_at <= now {
                    slot.count = 0;
                    slot.reset_at = now + policy.window;
                }
            })
            .or_insert_with(|| WindowSlot {
                count: 0,
                reset_at: now + policy.window,
            });

        let allowed = slot.count < policy.max_requests;
        if allowed {
            slot.count += 1;
        }

        RateLimitDecision {
            allowed,
            remaining: policy.max_requests.saturating_sub(slot.count),
            reset_after: slot.reset_at.saturating_duration_since(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn policy(max: u32, window: Duration) -> RateLimitPolicy {
        RateLimitPolicy::new(max, window)
    }

    #[tokio::test]
    async fn counts_down_and_denies_at_capacity() {
        let limiter = FixedWindowLimiter::new();
        let policy = policy(3, Duration::from_secs(60));

        for expected_remaining in [2, 1, 0] {
            let decision = limiter.allow("user:a", &policy).await;
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected_remaining);
        }

        let denied = limiter.allow("user:a", &policy).await;
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        assert!(denied.reset_after <= Duration::from_secs(60));
    }

    #[tokio::test]
    async fn window_elapse_resets_the_counter() {
        let limiter = FixedWindowLimiter::new();
        let policy = policy(2, Duration::from_millis(40));

        assert!(limiter.allow("user:b", &policy).await.allowed);
        assert!(limiter.allow("user:b", &policy).await.allowed);
        assert!(!limiter.allow("user:b", &policy).await.allowed);

        tokio::time::sleep(Duration::from_millis(60)).await;

        let decision = limiter.allow("user:b", &policy).await;
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let limiter = FixedWindowLimiter::new();
        let policy = policy(1, Duration::from_secs(60));

        assert!(limiter.allow("user:a", &policy).await.allowed);
        assert!(!limiter.allow("user:a", &policy).await.allowed);
        assert!(limiter.allow("ip:10.0.0.1", &policy).await.allowed);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_calls_never_exceed_capacity() {
        let limiter = Arc::new(FixedWindowLimiter::new());
        let policy = policy(10, Duration::from_secs(60));

        let mut handles = Vec::new();
        for _ in 0..40 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(async move {
                limiter.allow("user:hot", &policy).await.allowed
            }));
        }

        let mut allowed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                allowed += 1;
            }
        }

        assert_eq!(allowed, 10);
    }
}
