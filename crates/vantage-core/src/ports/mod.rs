//! Ports - trait definitions for external collaborators.
//! These are the "interfaces" that infrastructure must implement.

mod profile;
mod rate_limit;
mod session;

pub use profile::ProfileStore;
pub use rate_limit::{RateLimitDecision, RateLimiter};
pub use session::{SessionProvider, Subject};
