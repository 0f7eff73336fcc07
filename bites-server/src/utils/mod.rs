//! Utility module - shared types and helpers
//!
//! - [`AppError`] - application error type
//! - [`ApiResponse`] - uniform API response envelope
//! - logging setup

pub mod error;
pub mod logger;
pub mod result;

pub use error::{ApiResponse, AppError, ok, ok_empty, ok_with_message};
pub use result::AppResult;
