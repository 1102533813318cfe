//! Domain types - pure data with no infrastructure dependencies.

mod identity;
mod rate_limit;
mod route;

pub use identity::{Identity, Role};
pub use rate_limit::RateLimitPolicy;
pub use route::{RouteRule, RouteTable, normalize_path};
