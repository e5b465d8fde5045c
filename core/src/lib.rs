//! # Verification Core
//!
//! Domain layer of the OTP verification service: contacts and records,
//! the `VerificationStore` and `NotificationSender` contracts, the in-memory
//! store, the `OtpService` coordinator and retention cleanup.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
