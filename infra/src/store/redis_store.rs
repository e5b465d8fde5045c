//! Redis-backed verification store
//!
//! Each contact has one record hash and an optional verified marker:
//! - `{prefix}:record:{contact}` - hash with `code_hash`, `contact_type`,
//!   `created_at`, `expires_at`, `attempts`, `state` and `consumed_at`
//! - `{prefix}:verified:{contact}` - set on consumption, lives for the
//!   retention period
//!
//! Issue and verify each run as a single Lua script, so Redis applies them
//! atomically. Timestamps are epoch milliseconds taken from the service
//! clock, not from Redis. Old records disappear through key expiry
//! (TTL plus retention), so `purge_expired` has nothing to do.

use std::sync::Arc;

use async_trait::async_trait;
use redis::Script;
use tracing::{debug, warn};

use ov_core::domain::{generate_code_excluding, Contact, IssuedCode, VerifyOutcome};
use ov_core::errors::{DomainError, DomainResult};
use ov_core::repositories::{StorePolicy, VerificationStore};
use ov_core::services::clock::{Clock, SystemClock};

use super::hash_code;
use crate::cache::RedisClient;
use crate::InfrastructureError;

/// KEYS: record, verified. ARGV: code_hash, contact_type, created_at_ms,
/// expires_at_ms, pexpire_ms. Returns 0 when the new code would repeat
/// the record it replaces, 1 once written.
const ISSUE_SCRIPT: &str = r#"
local previous = redis.call('HGET', KEYS[1], 'code_hash')
if previous == ARGV[1] then
  return 0
end
redis.call('DEL', KEYS[1], KEYS[2])
redis.call('HSET', KEYS[1],
  'code_hash', ARGV[1],
  'contact_type', ARGV[2],
  'created_at', ARGV[3],
  'expires_at', ARGV[4],
  'attempts', 0,
  'state', 'active')
redis.call('PEXPIRE', KEYS[1], ARGV[5])
return 1
"#;

/// KEYS: record, verified. ARGV: submitted_hash, now_ms, max_attempts,
/// retention_ms. Returns {outcome, remaining_attempts}.
const VERIFY_SCRIPT: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 0 then
  return {'not_found', 0}
end
local state = redis.call('HGET', KEYS[1], 'state')
if state == 'consumed' or state == 'superseded' then
  return {'not_found', 0}
end
if state == 'locked' then
  return {'locked', 0}
end
local now = tonumber(ARGV[2])
if now > tonumber(redis.call('HGET', KEYS[1], 'expires_at')) then
  return {'expired', 0}
end
if redis.call('HGET', KEYS[1], 'code_hash') == ARGV[1] then
  redis.call('HSET', KEYS[1], 'state', 'consumed', 'consumed_at', ARGV[2])
  redis.call('SET', KEYS[2], ARGV[2], 'PX', ARGV[4])
  return {'success', 0}
end
local attempts = redis.call('HINCRBY', KEYS[1], 'attempts', 1)
local max_attempts = tonumber(ARGV[3])
if attempts >= max_attempts then
  redis.call('HSET', KEYS[1], 'state', 'locked')
  return {'locked', 0}
end
return {'mismatch', max_attempts - attempts}
"#;

/// Attempts at drawing a code that differs from the stored one
const MAX_ISSUE_ATTEMPTS: usize = 8;

/// Verification store backed by Redis
pub struct RedisVerificationStore {
    client: RedisClient,
    policy: StorePolicy,
    clock: Arc<dyn Clock>,
    issue_script: Script,
    verify_script: Script,
}

impl RedisVerificationStore {
    pub fn new(client: RedisClient, policy: StorePolicy) -> Self {
        Self::with_clock(client, policy, Arc::new(SystemClock))
    }

    pub fn with_clock(client: RedisClient, policy: StorePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            policy,
            clock,
            issue_script: Script::new(ISSUE_SCRIPT),
            verify_script: Script::new(VERIFY_SCRIPT),
        }
    }

    fn record_key(&self, contact: &Contact) -> String {
        self.client.key(&["record", contact.as_str()])
    }

    fn verified_key(&self, contact: &Contact) -> String {
        self.client.key(&["verified", contact.as_str()])
    }
}

#[async_trait]
impl VerificationStore for RedisVerificationStore {
    async fn issue(&self, contact: &Contact) -> DomainResult<IssuedCode> {
        let keys = [self.record_key(contact), self.verified_key(contact)];
        let now = self.clock.now();
        let expires_at = now + self.policy.ttl;
        let pexpire_ms = (self.policy.ttl + self.policy.retention).num_milliseconds();

        let mut last_code: Option<String> = None;
        for _ in 0..MAX_ISSUE_ATTEMPTS {
            let code = generate_code_excluding(self.policy.code_length, last_code.as_deref());
            let args = [
                hash_code(contact.as_str(), &code),
                contact.contact_type().as_str().to_string(),
                now.timestamp_millis().to_string(),
                expires_at.timestamp_millis().to_string(),
                pexpire_ms.to_string(),
            ];

            let written: i64 = self
                .client
                .eval_script(&self.issue_script, &keys, &args)
                .await?;
            if written == 1 {
                return Ok(IssuedCode::new(code, expires_at));
            }

            debug!(contact = %contact.masked(), "Drew the superseded code again, redrawing");
            last_code = Some(code);
        }

        warn!(contact = %contact.masked(), "Could not draw a fresh code");
        Err(DomainError::internal("could not draw a code distinct from the previous one"))
    }

    async fn verify(&self, contact: &Contact, submitted_code: &str) -> DomainResult<VerifyOutcome> {
        let keys = [self.record_key(contact), self.verified_key(contact)];
        let args = [
            hash_code(contact.as_str(), submitted_code),
            self.clock.now().timestamp_millis().to_string(),
            self.policy.max_attempts.to_string(),
            self.policy.retention.num_milliseconds().max(1).to_string(),
        ];

        let (outcome, remaining): (String, i64) = self
            .client
            .eval_script(&self.verify_script, &keys, &args)
            .await?;

        VerifyOutcome::from_code(&outcome, Some(remaining.max(0) as u32)).ok_or_else(|| {
            InfrastructureError::Corrupt(format!("unexpected verify outcome {:?}", outcome)).into()
        })
    }

    async fn is_verified(&self, contact: &Contact) -> DomainResult<bool> {
        Ok(self.client.exists(&self.verified_key(contact)).await?)
    }

    async fn health_check(&self) -> DomainResult<()> {
        match self.client.health_check().await? {
            true => Ok(()),
            false => Err(DomainError::store_unavailable("unexpected PING reply")),
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
