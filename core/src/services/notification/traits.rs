//! Trait for delivery channel integration

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::Contact;
use crate::errors::DeliveryError;

/// Proof that a provider accepted a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    /// Provider that accepted the message
    pub provider: String,
    /// Provider-side identifier, when the provider returns one
    pub provider_message_id: Option<String>,
}

impl DeliveryReceipt {
    pub fn new(provider: impl Into<String>, provider_message_id: Option<String>) -> Self {
        Self {
            provider: provider.into(),
            provider_message_id,
        }
    }
}

/// Delivers a code to a contact over email or SMS
///
/// Implementations must not log the code or echo it in errors.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Send `code` to `contact`
    async fn send(&self, contact: &Contact, code: &str) -> Result<DeliveryReceipt, DeliveryError>;

    /// Provider name for logs
    fn provider_name(&self) -> &str;
}

#[async_trait]
impl<T: NotificationSender + ?Sized> NotificationSender for Arc<T> {
    async fn send(&self, contact: &Contact, code: &str) -> Result<DeliveryReceipt, DeliveryError> {
        (**self).send(contact, code).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: NotificationSender + ?Sized> NotificationSender for Box<T> {
    async fn send(&self, contact: &Contact, code: &str) -> Result<DeliveryReceipt, DeliveryError> {
        (**self).send(contact, code).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}
