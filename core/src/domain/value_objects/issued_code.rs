//! Result of minting a new code

use chrono::{DateTime, Utc};

/// A freshly issued code and its expiry
///
/// The code is only ever handed to a `NotificationSender`; `Debug` keeps it
/// out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedCode {
    code: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedCode {
    pub fn new(code: String, expires_at: DateTime<Utc>) -> Self {
        Self { code, expires_at }
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl std::fmt::Debug for IssuedCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedCode")
            .field("code", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
