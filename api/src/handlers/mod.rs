//! Error mapping shared by every route

pub mod error;

pub use error::{json_config, method_not_allowed, not_found, ApiError};
