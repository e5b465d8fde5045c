//! Domain-specific error types and error handling.

mod delivery_error;

pub use delivery_error::DeliveryError;

use thiserror::Error;

/// Core domain errors surfaced by the coordinator and the stores
///
/// Verification outcomes (`mismatch`, `expired`, ...) are not errors; they
/// are returned as [`crate::domain::VerifyOutcome`]. Delivery failures are
/// not errors either, see [`DeliveryError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Verification store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable snake_case code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::InvalidInput { .. } => "invalid_input",
            DomainError::StoreUnavailable { .. } => "store_unavailable",
            DomainError::Internal { .. } => "internal_error",
        }
    }

    /// Whether the caller may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::StoreUnavailable { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
