//! SMTP email sender
//!
//! lettre's SMTP transport is blocking, so each send runs on the blocking
//! thread pool.

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use tracing::info;

use ov_core::domain::{Contact, ContactType};
use ov_core::errors::DeliveryError;
use ov_core::services::notification::{DeliveryReceipt, NotificationSender};
use ov_shared::config::{env_parse, env_string};

use super::template::MessageTemplate;
use crate::InfrastructureError;

const PROVIDER: &str = "smtp";

/// Configuration for SMTP email sending
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server host
    pub host: String,
    /// SMTP server port (465 for TLS)
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: Option<String>,
}

impl SmtpConfig {
    /// Create config from SMTP_HOST, SMTP_USERNAME, SMTP_PASSWORD,
    /// SMTP_FROM_EMAIL and the optional SMTP_PORT and SMTP_FROM_NAME
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let required = |key: &str| {
            env_string(key).ok_or_else(|| InfrastructureError::Config(format!("{} not set", key)))
        };

        Ok(Self {
            host: required("SMTP_HOST")?,
            port: env_parse("SMTP_PORT", 465)?,
            username: required("SMTP_USERNAME")?,
            password: required("SMTP_PASSWORD")?,
            from_email: required("SMTP_FROM_EMAIL")?,
            from_name: env_string("SMTP_FROM_NAME"),
        })
    }

    fn from_address(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_email),
            None => self.from_email.clone(),
        }
    }
}

/// Email sender over SMTP
pub struct SmtpEmailSender {
    transport: SmtpTransport,
    from: Mailbox,
    template: MessageTemplate,
}

impl SmtpEmailSender {
    pub fn new(config: SmtpConfig, template: MessageTemplate) -> Result<Self, InfrastructureError> {
        let from = config
            .from_address()
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP from address: {}", e)))?;

        let transport = SmtpTransport::relay(&config.host)
            .map_err(|e| InfrastructureError::Config(format!("Failed to create SMTP transport: {}", e)))?
            .port(config.port)
            .credentials(Credentials::new(config.username, config.password))
            .build();

        info!(host = %config.host, port = config.port, "SMTP email sender initialized");

        Ok(Self {
            transport,
            from,
            template,
        })
    }

    fn build_message(&self, to: &str, code: &str) -> Result<Message, DeliveryError> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| DeliveryError::rejected(PROVIDER, format!("invalid recipient: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(self.template.email_subject())
            .multipart(MultiPart::alternative_plain_html(
                self.template.email_text(code),
                self.template.email_html(code),
            ))
            .map_err(|e| DeliveryError::Misconfigured {
                message: format!("failed to build email: {}", e),
            })
    }
}

#[async_trait]
impl NotificationSender for SmtpEmailSender {
    async fn send(&self, contact: &Contact, code: &str) -> Result<DeliveryReceipt, DeliveryError> {
        if contact.contact_type() != ContactType::Email {
            return Err(DeliveryError::Unsupported {
                contact_type: contact.contact_type(),
            });
        }

        let message = self.build_message(contact.as_str(), code)?;
        let transport = self.transport.clone();

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| DeliveryError::transport(PROVIDER, e.to_string()))?
            .map_err(|e| DeliveryError::transport(PROVIDER, e.to_string()))?;

        info!(provider = PROVIDER, contact = %contact.masked(), "Email accepted");
        Ok(DeliveryReceipt::new(PROVIDER, None))
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
