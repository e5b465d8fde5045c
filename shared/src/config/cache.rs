//! Redis connection configuration

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};
use crate::errors::ConfigError;

/// Redis configuration for the Redis-backed verification store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Prefix prepended to every key written by the store
    pub key_prefix: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Maximum retry attempts for transient failures
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (doubles each retry)
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            key_prefix: String::from("otp"),
            connection_timeout: 5,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            url: env_string("REDIS_URL").unwrap_or(defaults.url),
            key_prefix: env_string("REDIS_KEY_PREFIX").unwrap_or(defaults.key_prefix),
            connection_timeout: env_parse("REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout)?,
            max_retries: env_parse("REDIS_MAX_RETRIES", defaults.max_retries)?,
            retry_delay_ms: env_parse("REDIS_RETRY_DELAY_MS", defaults.retry_delay_ms)?,
        })
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}
