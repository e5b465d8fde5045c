//! Verification store trait defining the contract for OTP record persistence.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Contact, IssuedCode, VerifyOutcome};
use crate::errors::DomainResult;

/// Durable keyed storage of OTP records
///
/// The store owns every record invariant. Implementations must guarantee:
/// - at most one active record per contact; `issue` supersedes the previous
///   one and never hands out the superseded code again
/// - `verify` checks and consumes atomically, so two concurrent correct
///   submissions produce exactly one `Success`
/// - a consumed record is never mutated again
///
/// Infrastructure failures surface as `DomainError::StoreUnavailable`.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Supersede any record for `contact` and mint a new one
    ///
    /// # Arguments
    /// * `contact` - Normalized contact; its type is stored with the record
    ///
    /// # Returns
    /// * `Ok(IssuedCode)` - The new code and its expiry
    /// * `Err(DomainError)` - The store could not be reached or written
    async fn issue(&self, contact: &Contact) -> DomainResult<IssuedCode>;

    /// Check `submitted_code` against the active record for `contact`
    ///
    /// Mismatches are counted against the record; the call that reaches the
    /// attempt limit locks it and returns `Locked`.
    async fn verify(&self, contact: &Contact, submitted_code: &str) -> DomainResult<VerifyOutcome>;

    /// Whether the most recent record for `contact` was consumed and is
    /// still within retention
    async fn is_verified(&self, contact: &Contact) -> DomainResult<bool>;

    /// Delete records whose `expires_at` is before `older_than`
    ///
    /// Stores that expire data on their own report `0`.
    async fn purge_expired(&self, _older_than: DateTime<Utc>) -> DomainResult<u64> {
        Ok(0)
    }

    /// Probe the backing service
    async fn health_check(&self) -> DomainResult<()> {
        Ok(())
    }

    /// Short name used in logs and the health report
    fn backend_name(&self) -> &'static str;
}

#[async_trait]
impl<T: VerificationStore + ?Sized> VerificationStore for Arc<T> {
    async fn issue(&self, contact: &Contact) -> DomainResult<IssuedCode> {
        (**self).issue(contact).await
    }

    async fn verify(&self, contact: &Contact, submitted_code: &str) -> DomainResult<VerifyOutcome> {
        (**self).verify(contact, submitted_code).await
    }

    async fn is_verified(&self, contact: &Contact) -> DomainResult<bool> {
        (**self).is_verified(contact).await
    }

    async fn purge_expired(&self, older_than: DateTime<Utc>) -> DomainResult<u64> {
        (**self).purge_expired(older_than).await
    }

    async fn health_check(&self) -> DomainResult<()> {
        (**self).health_check().await
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}
