//! Verification store implementations
//!
//! The in-memory store lives in `ov_core`; this module adds the remote
//! backends and picks one from configuration.

#[cfg(feature = "postgres-store")]
pub mod postgres_store;
#[cfg(feature = "redis-store")]
pub mod redis_store;

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::info;

use ov_core::repositories::{InMemoryVerificationStore, StorePolicy, VerificationStore};
use ov_shared::{AppConfig, StoreBackend};

use crate::InfrastructureError;

#[cfg(feature = "postgres-store")]
pub use postgres_store::PostgresVerificationStore;
#[cfg(feature = "redis-store")]
pub use redis_store::RedisVerificationStore;

/// Digest stored in place of a code
///
/// The contact is mixed in so equal codes for different contacts do not
/// share a digest.
pub fn hash_code(contact: &str, code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contact.as_bytes());
    hasher.update(b":");
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

/// Build the store selected by `STORE_BACKEND`
pub async fn create_verification_store(
    config: &AppConfig,
) -> Result<Arc<dyn VerificationStore>, InfrastructureError> {
    let policy = StorePolicy::from(&config.otp);

    let store: Arc<dyn VerificationStore> = match config.store.backend {
        StoreBackend::Memory => Arc::new(InMemoryVerificationStore::new(policy)),
        #[cfg(feature = "redis-store")]
        StoreBackend::Redis => {
            let client = crate::cache::RedisClient::new(&config.cache).await?;
            Arc::new(RedisVerificationStore::new(client, policy))
        }
        #[cfg(feature = "postgres-store")]
        StoreBackend::Postgres => {
            let pool = crate::database::DatabasePool::new(&config.database).await?;
            if config.database.run_migrations {
                pool.run_migrations().await?;
            }
            Arc::new(PostgresVerificationStore::new(pool, policy))
        }
        #[allow(unreachable_patterns)]
        other => {
            return Err(InfrastructureError::Config(format!(
                "store backend {} is not compiled into this build",
                other
            )))
        }
    };

    info!(backend = store.backend_name(), "Verification store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_code_is_hex_sha256() {
        let digest = hash_code("driver@example.com", "123456");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, hash_code("driver@example.com", "123456"));
    }

    #[test]
    fn test_hash_code_depends_on_contact() {
        assert_ne!(
            hash_code("a@example.com", "123456"),
            hash_code("b@example.com", "123456")
        );
    }

    #[tokio::test]
    async fn test_memory_backend_is_default() {
        let store = create_verification_store(&AppConfig::default()).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }
}
