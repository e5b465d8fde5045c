//! One-time passcode policy configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::env_parse;
use crate::errors::ConfigError;

/// Number of digits in an issued code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Lifetime of an issued code (5 minutes)
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Wrong guesses tolerated before a record locks
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Shortest and longest code lengths accepted
pub const MIN_CODE_LENGTH: usize = 4;
pub const MAX_CODE_LENGTH: usize = 10;

/// Code issuance and verification policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in each code
    pub code_length: usize,

    /// Seconds a code stays valid after issuance
    pub ttl_seconds: u64,

    /// Mismatches allowed before the record locks
    pub max_attempts: u32,

    /// Upper bound on any single store call
    pub store_timeout_ms: u64,

    /// Upper bound on a single delivery attempt
    pub delivery_timeout_ms: u64,

    /// How long records are kept after expiry (drives `expired` answers,
    /// the verified-status lookup and the cleanup horizon)
    pub record_retention_seconds: u64,

    /// Interval between retention cleanup cycles (0 disables cleanup)
    pub cleanup_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            ttl_seconds: DEFAULT_TTL_SECONDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            store_timeout_ms: 3_000,
            delivery_timeout_ms: 10_000,
            record_retention_seconds: 86_400,
            cleanup_interval_seconds: 600,
        }
    }
}

impl OtpConfig {
    /// Create from OTP_* environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            code_length: env_parse("OTP_CODE_LENGTH", defaults.code_length)?,
            ttl_seconds: env_parse("OTP_TTL_SECONDS", defaults.ttl_seconds)?,
            max_attempts: env_parse("OTP_MAX_ATTEMPTS", defaults.max_attempts)?,
            store_timeout_ms: env_parse("OTP_STORE_TIMEOUT_MS", defaults.store_timeout_ms)?,
            delivery_timeout_ms: env_parse("OTP_DELIVERY_TIMEOUT_MS", defaults.delivery_timeout_ms)?,
            record_retention_seconds: env_parse(
                "OTP_RECORD_RETENTION_SECONDS",
                defaults.record_retention_seconds,
            )?,
            cleanup_interval_seconds: env_parse(
                "OTP_CLEANUP_INTERVAL_SECONDS",
                defaults.cleanup_interval_seconds,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(ConfigError::invalid(format!(
                "OTP_CODE_LENGTH must be between {} and {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH
            )));
        }
        if self.ttl_seconds == 0 {
            return Err(ConfigError::invalid("OTP_TTL_SECONDS must be positive"));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::invalid("OTP_MAX_ATTEMPTS must be positive"));
        }
        if self.store_timeout_ms == 0 || self.delivery_timeout_ms == 0 {
            return Err(ConfigError::invalid("OTP timeouts must be positive"));
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// TTL rounded up to whole minutes, for message templates
    pub fn ttl_minutes(&self) -> u64 {
        self.ttl_seconds.div_ceil(60)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_timeout_ms)
    }

    pub fn record_retention(&self) -> Duration {
        Duration::from_secs(self.record_retention_seconds)
    }
}
