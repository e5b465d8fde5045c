//! Outcome of checking a submitted code

use serde::Serialize;

/// What happened when a code was submitted
///
/// Every variant except `Success` leaves the caller unverified. None of them
/// is an error: they are ordinary answers returned with HTTP 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum VerifyOutcome {
    /// Code matched; the record is now consumed
    Success,
    /// Wrong code; the record stays active
    Mismatch { remaining_attempts: u32 },
    /// No active record (never issued, consumed or superseded)
    NotFound,
    /// Record outlived its TTL
    Expired,
    /// Too many wrong codes; a new code must be requested
    Locked,
}

impl VerifyOutcome {
    /// Stable snake_case code returned to clients as `message`
    pub fn code(&self) -> &'static str {
        match self {
            VerifyOutcome::Success => "success",
            VerifyOutcome::Mismatch { .. } => "mismatch",
            VerifyOutcome::NotFound => "not_found",
            VerifyOutcome::Expired => "expired",
            VerifyOutcome::Locked => "locked",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, VerifyOutcome::Success)
    }

    pub fn remaining_attempts(&self) -> Option<u32> {
        match self {
            VerifyOutcome::Mismatch { remaining_attempts } => Some(*remaining_attempts),
            _ => None,
        }
    }

    /// Inverse of [`VerifyOutcome::code`], used by remote stores
    pub fn from_code(code: &str, remaining_attempts: Option<u32>) -> Option<Self> {
        match code {
            "success" => Some(VerifyOutcome::Success),
            "mismatch" => Some(VerifyOutcome::Mismatch {
                remaining_attempts: remaining_attempts.unwrap_or(0),
            }),
            "not_found" => Some(VerifyOutcome::NotFound),
            "expired" => Some(VerifyOutcome::Expired),
            "locked" => Some(VerifyOutcome::Locked),
            _ => None,
        }
    }
}

impl std::fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
