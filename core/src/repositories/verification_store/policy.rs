//! Issuance and verification policy shared by every store backend

use chrono::Duration;
use ov_shared::OtpConfig;

/// Code length, lifetime and attempt limit applied by a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorePolicy {
    pub code_length: usize,
    pub ttl: Duration,
    pub max_attempts: u32,
    /// How long a record stays readable after it expires or is consumed
    pub retention: Duration,
}

impl Default for StorePolicy {
    fn default() -> Self {
        Self::from(&OtpConfig::default())
    }
}

impl From<&OtpConfig> for StorePolicy {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            ttl: Duration::seconds(config.ttl_seconds as i64),
            max_attempts: config.max_attempts,
            retention: Duration::seconds(config.record_retention_seconds as i64),
        }
    }
}
