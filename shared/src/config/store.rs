//! Verification store backend selection

use serde::{Deserialize, Serialize};

use super::env_string;
use crate::errors::ConfigError;

/// Where OTP records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map; development and tests only
    #[default]
    Memory,
    /// Redis with server-side Lua scripts
    Redis,
    /// PostgreSQL with per-contact advisory locks
    Postgres,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Postgres => write!(f, "postgres"),
        }
    }
}

/// Store selection
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

impl StoreConfig {
    /// Create from STORE_BACKEND
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = match env_string("STORE_BACKEND") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "STORE_BACKEND".to_string(),
                value: raw,
            })?,
            None => StoreBackend::default(),
        };
        Ok(Self { backend })
    }
}
