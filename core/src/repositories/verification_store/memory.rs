//! In-process verification store
//!
//! Keeps the latest record per contact in a `HashMap` behind a synchronous
//! mutex. The lock is only held for the map operation itself and never
//! across an `.await`, which is what makes issue and verify atomic here.
//! Records are lost on restart, so this backend is refused in production.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{generate_code_excluding, Contact, IssuedCode, OtpRecord, RecordState, VerifyOutcome};
use crate::errors::{DomainError, DomainResult};
use crate::services::clock::{Clock, SystemClock};

use super::policy::StorePolicy;
use super::r#trait::VerificationStore;

/// Verification store backed by process memory
pub struct InMemoryVerificationStore {
    records: Mutex<HashMap<String, OtpRecord>>,
    policy: StorePolicy,
    clock: Arc<dyn Clock>,
}

impl InMemoryVerificationStore {
    pub fn new(policy: StorePolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    pub fn with_clock(policy: StorePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            policy,
            clock,
        }
    }

    /// Number of records currently held, in any state
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, HashMap<String, OtpRecord>>> {
        self.records
            .lock()
            .map_err(|_| DomainError::internal("in-memory store lock poisoned"))
    }
}

impl Default for InMemoryVerificationStore {
    fn default() -> Self {
        Self::new(StorePolicy::default())
    }
}

#[async_trait]
impl VerificationStore for InMemoryVerificationStore {
    async fn issue(&self, contact: &Contact) -> DomainResult<IssuedCode> {
        let now = self.clock.now();
        let mut records = self.lock()?;

        let previous = records.get(contact.as_str()).map(|r| r.code.as_str());
        let code = generate_code_excluding(self.policy.code_length, previous);

        let record = OtpRecord::new(contact, code.clone(), self.policy.ttl, now);
        let expires_at = record.expires_at;
        records.insert(contact.as_str().to_string(), record);

        Ok(IssuedCode::new(code, expires_at))
    }

    async fn verify(&self, contact: &Contact, submitted_code: &str) -> DomainResult<VerifyOutcome> {
        let now = self.clock.now();
        let mut records = self.lock()?;

        Ok(match records.get_mut(contact.as_str()) {
            Some(record) => record.check(submitted_code, self.policy.max_attempts, now),
            None => VerifyOutcome::NotFound,
        })
    }

    async fn is_verified(&self, contact: &Contact) -> DomainResult<bool> {
        let now = self.clock.now();
        let records = self.lock()?;

        Ok(records
            .get(contact.as_str())
            .and_then(|r| match r.state {
                RecordState::Consumed => r.consumed_at,
                _ => None,
            })
            .map(|consumed_at| now - consumed_at <= self.policy.retention)
            .unwrap_or(false))
    }

    async fn purge_expired(&self, older_than: DateTime<Utc>) -> DomainResult<u64> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|_, r| r.expires_at >= older_than);
        Ok((before - records.len()) as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
