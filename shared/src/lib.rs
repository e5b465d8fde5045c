//! Shared utilities and configuration for the verification service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Configuration error type
//! - Contact utilities (email/phone validation, normalization, masking)
//! - Response envelopes shared by the HTTP layer

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CorsConfig, DatabaseConfig, EmailProvider, Environment,
    LogFormat, LoggingConfig, NotificationConfig, OtpConfig, ServerConfig, SmsProvider,
    StoreBackend, StoreConfig,
};
pub use errors::ConfigError;
pub use types::{ErrorResponse, HealthResponse, HealthStatus, ServiceHealth};
pub use utils::{email, mask_contact, phone};
