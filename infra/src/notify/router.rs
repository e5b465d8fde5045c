//! Dispatch by contact type

use std::sync::Arc;

use async_trait::async_trait;

use ov_core::domain::{Contact, ContactType};
use ov_core::errors::DeliveryError;
use ov_core::services::notification::{DeliveryReceipt, NotificationSender};

/// Sends email contacts through one sender and phone contacts through another
///
/// A missing channel answers `DeliveryError::Unsupported`.
#[derive(Clone, Default)]
pub struct ContactRouter {
    email: Option<Arc<dyn NotificationSender>>,
    sms: Option<Arc<dyn NotificationSender>>,
}

impl ContactRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, sender: Arc<dyn NotificationSender>) -> Self {
        self.email = Some(sender);
        self
    }

    pub fn with_sms(mut self, sender: Arc<dyn NotificationSender>) -> Self {
        self.sms = Some(sender);
        self
    }

    fn route(&self, contact_type: ContactType) -> Option<&Arc<dyn NotificationSender>> {
        match contact_type {
            ContactType::Email => self.email.as_ref(),
            ContactType::Phone => self.sms.as_ref(),
        }
    }

    /// Provider names as `email=<name>, sms=<name>`
    pub fn describe(&self) -> String {
        let name = |sender: Option<&Arc<dyn NotificationSender>>| {
            sender.map_or("none".to_string(), |s| s.provider_name().to_string())
        };
        format!(
            "email={}, sms={}",
            name(self.email.as_ref()),
            name(self.sms.as_ref())
        )
    }
}

#[async_trait]
impl NotificationSender for ContactRouter {
    async fn send(&self, contact: &Contact, code: &str) -> Result<DeliveryReceipt, DeliveryError> {
        match self.route(contact.contact_type()) {
            Some(sender) => sender.send(contact, code).await,
            None => Err(DeliveryError::Unsupported {
                contact_type: contact.contact_type(),
            }),
        }
    }

    fn provider_name(&self) -> &str {
        "router"
    }
}
