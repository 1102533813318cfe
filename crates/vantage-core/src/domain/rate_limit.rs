//! Rate limit policies.

use std::time::Duration;

/// A (capacity, window) pair bounding how many requests a caller key may
/// make. Policies are fixed configuration selected by name at startup, not
/// tunable at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

impl RateLimitPolicy {
    /// Sign-in and session endpoints.
    pub const AUTH: Self = Self::new(3, Duration::from_secs(300));
    /// Survey submissions.
    pub const SURVEY: Self = Self::new(3, Duration::from_secs(60));
    /// Expert review actions.
    pub const EXPERT: Self = Self::new(10, Duration::from_secs(60));
    /// Generic API traffic.
    pub const API: Self = Self::new(10, Duration::from_secs(60));

    pub const fn new(max_requests: u32, window: Duration) -> Self {
        assert!(max_requests > 0, "policy capacity must be positive");
        assert!(!window.is_zero(), "policy window must be positive");
        Self {
            max_requests,
            window,
        }
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::API
    }
}
