//! Main OTP coordinator implementation

use std::future::Future;
use std::sync::Arc;

use tokio::time::timeout;

use crate::domain::{Contact, ContactType, VerifyOutcome};
use crate::errors::{DeliveryError, DomainError, DomainResult};
use crate::repositories::VerificationStore;
use crate::services::notification::NotificationSender;

use super::config::OtpServiceConfig;
use super::types::{DeliveryStatus, RequestCodeResult, VerifyCodeResult};

/// Coordinator for issuing and verifying one-time passcodes
///
/// Holds no state of its own: every request goes to the store, so any number
/// of instances can share one store.
pub struct OtpService<S, N>
where
    S: VerificationStore + ?Sized,
    N: NotificationSender + ?Sized,
{
    /// Store that owns record invariants
    store: Arc<S>,
    /// Out-of-band delivery channel
    sender: Arc<N>,
    /// Collaborator timeouts
    config: OtpServiceConfig,
}

impl<S, N> OtpService<S, N>
where
    S: VerificationStore + ?Sized,
    N: NotificationSender + ?Sized,
{
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `store` - Verification store implementation
    /// * `sender` - Notification sender implementation
    /// * `config` - Service configuration
    pub fn new(store: Arc<S>, sender: Arc<N>, config: OtpServiceConfig) -> Self {
        Self {
            store,
            sender,
            config,
        }
    }

    /// Issue a code for a contact and send it out-of-band
    ///
    /// This method:
    /// 1. Validates and normalizes the contact against its declared type
    /// 2. Asks the store to supersede any previous record and mint a new one
    /// 3. Hands the code to the notification sender
    ///
    /// A failed or timed-out delivery does not fail the request: the code
    /// stays valid and the result carries `DeliveryStatus::Failed`.
    ///
    /// # Returns
    ///
    /// * `Ok(RequestCodeResult)` - Expiry and delivery status
    /// * `Err(DomainError)` - Invalid contact, or the store is unavailable
    pub async fn request_code(
        &self,
        raw_contact: &str,
        contact_type: ContactType,
    ) -> DomainResult<RequestCodeResult> {
        let contact = Contact::parse(raw_contact, contact_type).map_err(|e| {
            tracing::debug!(
                contact_type = %contact_type,
                event = "otp_request_rejected",
                error = %e,
                "Rejected OTP request with invalid contact"
            );
            e
        })?;

        let issued = self
            .with_store_timeout("issue", self.store.issue(&contact))
            .await?;

        tracing::info!(
            contact = %contact.masked(),
            contact_type = %contact_type,
            expires_at = %issued.expires_at,
            backend = self.store.backend_name(),
            event = "otp_issued",
            "Issued verification code"
        );

        let delivery = self.deliver(&contact, issued.code()).await;

        Ok(RequestCodeResult {
            contact: contact.as_str().to_string(),
            contact_type,
            expires_at: issued.expires_at,
            delivery,
        })
    }

    /// Check a submitted code for a contact
    ///
    /// The contact type is inferred from its shape. Codes of the wrong length
    /// or containing non-digits are not rejected up front: they go to the
    /// store and count as a mismatched attempt.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyCodeResult)` - The outcome, successful or not
    /// * `Err(DomainError)` - Missing input, or the store is unavailable
    pub async fn submit_code(
        &self,
        raw_contact: &str,
        submitted_code: &str,
    ) -> DomainResult<VerifyCodeResult> {
        let submitted_code = submitted_code.trim();
        if submitted_code.is_empty() {
            return Err(DomainError::invalid_input("otpCode is required"));
        }
        let contact = Contact::parse_inferred(raw_contact)?;

        let outcome = self
            .with_store_timeout("verify", self.store.verify(&contact, submitted_code))
            .await?;

        match outcome {
            VerifyOutcome::Success => tracing::info!(
                contact = %contact.masked(),
                event = "otp_verified",
                "Verification code accepted"
            ),
            VerifyOutcome::Locked => tracing::info!(
                contact = %contact.masked(),
                event = "otp_locked",
                "Verification rejected, record locked after too many attempts"
            ),
            other => tracing::debug!(
                contact = %contact.masked(),
                outcome = other.code(),
                remaining_attempts = other.remaining_attempts(),
                event = "otp_verification_rejected",
                "Verification code rejected"
            ),
        }

        Ok(VerifyCodeResult { outcome })
    }

    /// Whether the contact's most recent code was verified
    pub async fn is_verified(&self, raw_contact: &str) -> DomainResult<bool> {
        let contact = Contact::parse_inferred(raw_contact)?;
        self.with_store_timeout("is_verified", self.store.is_verified(&contact))
            .await
    }

    /// Probe the store, bounded by the store timeout
    pub async fn health_check(&self) -> DomainResult<()> {
        self.with_store_timeout("health_check", self.store.health_check())
            .await
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    async fn deliver(&self, contact: &Contact, code: &str) -> DeliveryStatus {
        let result = match timeout(self.config.delivery_timeout, self.sender.send(contact, code)).await {
            Ok(result) => result,
            Err(_) => Err(DeliveryError::Timeout {
                after_ms: self.config.delivery_timeout.as_millis() as u64,
            }),
        };

        match result {
            Ok(receipt) => {
                tracing::info!(
                    contact = %contact.masked(),
                    provider = %receipt.provider,
                    provider_message_id = receipt.provider_message_id.as_deref(),
                    event = "otp_delivered",
                    "Verification code delivered"
                );
                DeliveryStatus::Delivered(receipt)
            }
            Err(err) => {
                tracing::warn!(
                    contact = %contact.masked(),
                    provider = self.sender.provider_name(),
                    error = %err,
                    event = "otp_delivery_failed",
                    "Verification code issued but delivery failed"
                );
                DeliveryStatus::Failed(err)
            }
        }
    }

    async fn with_store_timeout<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = DomainResult<T>>,
    ) -> DomainResult<T> {
        let result = match timeout(self.config.store_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::store_unavailable(format!(
                "{} timed out after {} ms",
                operation,
                self.config.store_timeout.as_millis()
            ))),
        };

        if let Err(err) = &result {
            match err {
                DomainError::StoreUnavailable { .. } | DomainError::Internal { .. } => {
                    tracing::error!(
                        operation,
                        backend = self.store.backend_name(),
                        error = %err,
                        event = "otp_store_failed",
                        "Verification store call failed"
                    );
                }
                DomainError::InvalidInput { .. } => {}
            }
        }
        result
    }
}
