//! Redis verification store against a live server
//!
//! Run with: cargo test -p ov_infra --test redis_store_integration -- --ignored

mod common;

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use ov_core::repositories::{StorePolicy, VerificationStore};
use ov_core::services::clock::ManualClock;
use ov_infra::cache::{CacheConfig, RedisClient};
use ov_infra::store::RedisVerificationStore;

async fn store() -> (RedisVerificationStore, Arc<ManualClock>) {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let config = CacheConfig {
        key_prefix: format!("otp-test-{}", Uuid::new_v4().simple()),
        ..CacheConfig::new(url)
    };

    let client = RedisClient::new(&config).await.unwrap();
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let store = RedisVerificationStore::with_clock(client, StorePolicy::default(), clock.clone());
    (store, clock)
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_round_trip() {
    let (store, _) = store().await;
    store.health_check().await.unwrap();
    common::round_trip(&store).await;
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_reissue_supersedes() {
    let (store, _) = store().await;
    common::supersede(&store).await;
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_lockout() {
    let (store, _) = store().await;
    common::lockout(&store, StorePolicy::default().max_attempts).await;
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_expiry_uses_service_clock() {
    let (store, clock) = store().await;
    common::expiry(&store, &clock, StorePolicy::default().ttl).await;
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_reissue_in_same_instant() {
    let (store, _) = store().await;
    common::reissue_in_same_instant(&store).await;
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_concurrent_issue_single_winner() {
    let (store, _) = store().await;
    common::concurrent_issue(Arc::new(store)).await;
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_concurrent_verify_single_success() {
    let (store, _) = store().await;
    common::concurrent_verify(Arc::new(store)).await;
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_purge_is_left_to_key_expiry() {
    let (store, _) = store().await;
    assert_eq!(store.purge_expired(Utc::now()).await.unwrap(), 0);
}
