//! # Vantage Core
//!
//! The domain layer of the Vantage gateway.
//! This crate contains pure decision logic and port traits with zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod gateway;
pub mod ports;

pub use error::CollaboratorError;
