//! Errors reported by notification senders

use thiserror::Error;

use crate::domain::ContactType;

/// Why an out-of-band delivery did not happen
///
/// Display strings never contain the code being delivered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The provider answered and refused the message
    #[error("{provider} rejected the message: {message}")]
    Rejected { provider: String, message: String },

    /// The provider could not be reached or answered garbage
    #[error("{provider} transport error: {message}")]
    Transport { provider: String, message: String },

    #[error("Delivery timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    #[error("No sender configured for {contact_type} contacts")]
    Unsupported { contact_type: ContactType },

    #[error("Sender misconfigured: {message}")]
    Misconfigured { message: String },
}

impl DeliveryError {
    pub fn rejected(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Short machine-readable kind, used in client-facing notes
    pub fn kind(&self) -> &'static str {
        match self {
            DeliveryError::Rejected { .. } => "rejected",
            DeliveryError::Transport { .. } => "transport",
            DeliveryError::Timeout { .. } => "timeout",
            DeliveryError::Unsupported { .. } => "unsupported",
            DeliveryError::Misconfigured { .. } => "misconfigured",
        }
    }

    /// Whether sending again might succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DeliveryError::Transport { .. } | DeliveryError::Timeout { .. }
        )
    }
}
