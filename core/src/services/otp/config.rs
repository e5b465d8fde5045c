//! Configuration for the OTP coordinator

use std::time::Duration;

use ov_shared::OtpConfig;

/// Timeouts applied by the coordinator around collaborator calls
///
/// Code length, TTL and attempt limits belong to the store
/// (see [`StorePolicy`](crate::repositories::StorePolicy)).
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Upper bound on a single store call
    pub store_timeout: Duration,
    /// Upper bound on a single delivery attempt
    pub delivery_timeout: Duration,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self::from(&OtpConfig::default())
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            store_timeout: config.store_timeout(),
            delivery_timeout: config.delivery_timeout(),
        }
    }
}
