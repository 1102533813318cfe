//! # Vantage Infrastructure
//!
//! Concrete implementations of the ports defined in `vantage-core`:
//! session validation, profile lookup, and rate limiting.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - SeaORM-backed profile store

pub mod profile;
pub mod rate_limit;
pub mod session;

#[cfg(feature = "postgres")]
pub mod database;

// Re-exports - In-Memory
pub use profile::InMemoryProfileStore;
pub use rate_limit::FixedWindowLimiter;
pub use session::{JwtSessionProvider, SessionConfig};

// Re-exports - Postgres
#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, DatabaseConnections};
#[cfg(feature = "postgres")]
pub use profile::PostgresProfileStore;
