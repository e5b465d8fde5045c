//! HTTP layer of the verification service
//!
//! Exposed as a library so integration tests can mount the same routes the
//! binary serves.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure, AppState, DynOtpService};
pub use handlers::json_config;
