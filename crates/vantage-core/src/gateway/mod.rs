//! Per-request orchestration: identity resolution, route authorization,
//! and quota enforcement.

mod engine;
mod resolver;

pub use engine::{Decision, GatewayDecisionEngine, GatewayRequest};
pub use resolver::IdentityResolver;
