//! Middleware modules.

pub mod error;
pub mod gateway;
pub mod identity;
