//! Session validation implementations.

mod jwt;

pub use jwt::{JwtSessionProvider, SessionConfig};
