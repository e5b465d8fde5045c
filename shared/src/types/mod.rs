//! Wire types shared between the HTTP layer and its tests

pub mod response;

pub use response::{ErrorResponse, HealthResponse, HealthStatus, ServiceHealth};
