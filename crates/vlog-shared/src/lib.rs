//! # Vlog Shared
//!
//! Wire types of the vlog HTTP API. Kept free of server dependencies so a
//! client can reuse them.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
