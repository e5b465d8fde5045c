//! Console sender for development
//!
//! Prints the message to stdout instead of delivering it. This is the only
//! place a code is ever written out, and production configuration refuses it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use ov_core::domain::{Contact, ContactType};
use ov_core::errors::DeliveryError;
use ov_core::services::notification::{DeliveryReceipt, NotificationSender};

use super::template::MessageTemplate;

/// Development sender that writes messages to the console
#[derive(Clone)]
pub struct ConsoleSender {
    template: MessageTemplate,
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to print messages to console
    console_output: bool,
}

impl ConsoleSender {
    pub fn new(template: MessageTemplate) -> Self {
        Self {
            template,
            message_count: Arc::new(AtomicU64::new(0)),
            console_output: true,
        }
    }

    /// Count messages without printing them
    pub fn silent(template: MessageTemplate) -> Self {
        Self {
            console_output: false,
            ..Self::new(template)
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for ConsoleSender {
    fn default() -> Self {
        Self::new(MessageTemplate::default())
    }
}

#[async_trait]
impl NotificationSender for ConsoleSender {
    async fn send(&self, contact: &Contact, code: &str) -> Result<DeliveryReceipt, DeliveryError> {
        let message_id = format!("console_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            let (channel, body) = match contact.contact_type() {
                ContactType::Email => (
                    "EMAIL",
                    format!(
                        "Subject: {}\n{}",
                        self.template.email_subject(),
                        self.template.email_text(code)
                    ),
                ),
                ContactType::Phone => ("SMS", self.template.sms_body(code)),
            };

            println!("\n{}", "=".repeat(60));
            println!("CONSOLE {} SENDER - MESSAGE #{}", channel, count);
            println!("{}", "=".repeat(60));
            println!("To: {}", contact.as_str());
            println!("Message ID: {}", message_id);
            println!("{}", body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            provider = "console",
            contact = %contact.masked(),
            message_id = %message_id,
            "Message written to console"
        );

        Ok(DeliveryReceipt::new("console", Some(message_id)))
    }

    fn provider_name(&self) -> &str {
        "console"
    }
}
