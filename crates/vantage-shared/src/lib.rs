//! # Vantage Shared
//!
//! Response and DTO types shared between the gateway and its clients.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
