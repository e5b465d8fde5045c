//! OTP record entity and code generation

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::contact::{Contact, ContactType};
use crate::domain::value_objects::VerifyOutcome;

/// Lifecycle state of a record
///
/// Expiry is not a state: it is derived from `expires_at` at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    Active,
    Consumed,
    Locked,
    Superseded,
}

impl RecordState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordState::Active => "active",
            RecordState::Consumed => "consumed",
            RecordState::Locked => "locked",
            RecordState::Superseded => "superseded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(RecordState::Active),
            "consumed" => Some(RecordState::Consumed),
            "locked" => Some(RecordState::Locked),
            "superseded" => Some(RecordState::Superseded),
            _ => None,
        }
    }
}

/// One issued code bound to one contact
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    pub id: Uuid,

    /// Normalized contact address
    pub contact: String,

    pub contact_type: ContactType,

    /// The numeric code; only the in-memory store keeps it in clear
    pub code: String,

    /// Mismatched verification attempts against this record
    pub attempts: u32,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,

    pub state: RecordState,

    /// Set once, when the record is consumed
    pub consumed_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for OtpRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpRecord")
            .field("id", &self.id)
            .field("contact", &ov_shared::mask_contact(&self.contact))
            .field("contact_type", &self.contact_type)
            .field("code", &"<redacted>")
            .field("attempts", &self.attempts)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("state", &self.state)
            .field("consumed_at", &self.consumed_at)
            .finish()
    }
}

impl OtpRecord {
    /// Create a fresh active record
    pub fn new(contact: &Contact, code: String, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            contact: contact.as_str().to_string(),
            contact_type: contact.contact_type(),
            code,
            attempts: 0,
            created_at: now,
            expires_at: now + ttl,
            state: RecordState::Active,
            consumed_at: None,
        }
    }

    /// A record is expired strictly after `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether this record can still be consumed
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.state == RecordState::Active && !self.is_expired_at(now)
    }

    /// Check a submitted code and apply the resulting transition
    ///
    /// Precedence: consumed/superseded, then locked, then expired, then the
    /// code comparison. A record is never touched once consumed.
    pub fn check(&mut self, submitted: &str, max_attempts: u32, now: DateTime<Utc>) -> VerifyOutcome {
        match self.state {
            RecordState::Consumed | RecordState::Superseded => return VerifyOutcome::NotFound,
            RecordState::Locked => return VerifyOutcome::Locked,
            RecordState::Active => {}
        }

        if self.is_expired_at(now) {
            return VerifyOutcome::Expired;
        }

        if constant_time_eq(self.code.as_bytes(), submitted.as_bytes()) {
            self.state = RecordState::Consumed;
            self.consumed_at = Some(now);
            return VerifyOutcome::Success;
        }

        self.attempts = self.attempts.saturating_add(1);
        if self.attempts >= max_attempts {
            self.state = RecordState::Locked;
            VerifyOutcome::Locked
        } else {
            VerifyOutcome::Mismatch {
                remaining_attempts: max_attempts - self.attempts,
            }
        }
    }
}

/// Generate a numeric code of `length` digits from the OS CSPRNG
///
/// Each digit is drawn uniformly from 0-9, so leading zeros are as likely as
/// any other digit and there is no modulo bias.
pub fn generate_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Generate a code that differs from `previous`
pub fn generate_code_excluding(length: usize, previous: Option<&str>) -> String {
    loop {
        let code = generate_code(length);
        if previous != Some(code.as_str()) {
            return code;
        }
    }
}
