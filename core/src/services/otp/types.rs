//! Types for coordinator results

use chrono::{DateTime, Utc};

use crate::domain::{ContactType, VerifyOutcome};
use crate::errors::DeliveryError;
use crate::services::notification::DeliveryReceipt;

/// What happened to the out-of-band message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered(DeliveryReceipt),
    /// The code was issued and stays valid, but the message did not go out
    Failed(DeliveryError),
}

impl DeliveryStatus {
    /// `delivered` or `failed`
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Delivered(_) => "delivered",
            DeliveryStatus::Failed(_) => "failed",
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered(_))
    }

    /// Client-facing diagnostic for a failed delivery
    ///
    /// Only the failure kind is exposed; provider responses stay in the logs.
    pub fn note(&self) -> Option<String> {
        match self {
            DeliveryStatus::Delivered(_) => None,
            DeliveryStatus::Failed(err) => Some(format!(
                "delivery failed ({}); the code was issued and remains valid until it expires",
                err.kind()
            )),
        }
    }
}

/// Result of requesting a code
#[derive(Debug, Clone)]
pub struct RequestCodeResult {
    /// Normalized contact the code is bound to
    pub contact: String,
    pub contact_type: ContactType,
    pub expires_at: DateTime<Utc>,
    pub delivery: DeliveryStatus,
}

/// Result of submitting a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyCodeResult {
    pub outcome: VerifyOutcome,
}

impl VerifyCodeResult {
    pub fn success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Stable outcome code: `success`, `mismatch`, `not_found`, `expired`, `locked`
    pub fn message(&self) -> &'static str {
        self.outcome.code()
    }

    pub fn remaining_attempts(&self) -> Option<u32> {
        self.outcome.remaining_attempts()
    }
}
