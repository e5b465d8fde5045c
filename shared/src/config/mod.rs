//! Configuration module with per-concern sub-modules
//!
//! Every setting is read from the process environment (optionally seeded
//! from a `.env` file by the binary) into typed structs with defaults:
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//! - `otp` - Code length, TTL, attempt limit and timeouts
//! - `store` - Verification store backend selection
//! - `cache` - Redis connection settings
//! - `database` - PostgreSQL connection settings
//! - `notification` - Email/SMS provider selection

pub mod cache;
pub mod database;
pub mod environment;
pub mod notification;
pub mod otp;
pub mod server;
pub mod store;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use notification::{EmailProvider, NotificationConfig, SmsProvider};
pub use otp::OtpConfig;
pub use server::{CorsConfig, ServerConfig};
pub use store::{StoreBackend, StoreConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
    pub otp: OtpConfig,
    pub store: StoreConfig,
    pub cache: CacheConfig,
    pub database: DatabaseConfig,
    pub notification: NotificationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let environment = Environment::default();
        Self {
            environment,
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(environment),
            otp: OtpConfig::default(),
            store: StoreConfig::default(),
            cache: CacheConfig::default(),
            database: DatabaseConfig::default(),
            notification: NotificationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and validate it
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        let config = Self {
            environment,
            server: ServerConfig::from_env()?,
            cors: CorsConfig::from_env()?,
            logging: LoggingConfig::from_env(environment),
            otp: OtpConfig::from_env()?,
            store: StoreConfig::from_env()?,
            cache: CacheConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            notification: NotificationConfig::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field rules that individual loaders cannot see
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.otp.validate()?;

        if self.environment.is_production() {
            if self.notification.email_provider == EmailProvider::Console {
                return Err(ConfigError::invalid(
                    "EMAIL_PROVIDER=console is not allowed in production",
                ));
            }
            if self.notification.sms_provider == SmsProvider::Console {
                return Err(ConfigError::invalid(
                    "SMS_PROVIDER=console is not allowed in production",
                ));
            }
            if self.store.backend == StoreBackend::Memory {
                return Err(ConfigError::invalid(
                    "STORE_BACKEND=memory is not allowed in production",
                ));
            }
        }

        Ok(())
    }
}

/// Read a variable, treating empty values as unset
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse a variable, falling back to `default` when unset
pub fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env_string(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}
