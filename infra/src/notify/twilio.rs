//! Twilio SMS sender
//!
//! Sends through the Twilio REST API, retrying server errors and rate limits
//! with exponential backoff. Client errors are not retried.

use std::time::Duration;

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use ov_core::domain::{Contact, ContactType};
use ov_core::errors::DeliveryError;
use ov_core::services::notification::{DeliveryReceipt, NotificationSender};
use ov_shared::config::{env_parse, env_string};
use ov_shared::phone::mask_phone_number;

use super::template::MessageTemplate;
use crate::InfrastructureError;

const PROVIDER: &str = "twilio";

/// Twilio's limit on a single message body
const MAX_BODY_LEN: usize = 1600;

/// Twilio SMS sender configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl TwilioConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let account_sid = env_string("TWILIO_ACCOUNT_SID")
            .ok_or_else(|| InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = env_string("TWILIO_AUTH_TOKEN")
            .ok_or_else(|| InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let from_number = env_string("TWILIO_FROM_NUMBER")
            .ok_or_else(|| InfrastructureError::Config("TWILIO_FROM_NUMBER not set".to_string()))?;

        if !from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            max_retries: env_parse("TWILIO_MAX_RETRIES", 3)?,
            retry_delay_ms: env_parse("TWILIO_RETRY_DELAY_MS", 1000)?,
        })
    }
}

/// SMS sender backed by Twilio
pub struct TwilioSmsSender {
    client: Client,
    config: TwilioConfig,
    template: MessageTemplate,
}

impl TwilioSmsSender {
    pub fn new(config: TwilioConfig, template: MessageTemplate) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS sender initialized"
        );

        Self {
            client,
            config,
            template,
        }
    }

    async fn send_with_retry(&self, to: &str, body: &str) -> Result<String, DeliveryError> {
        let max_retries = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(attempt = attempts, max_retries, to = %mask_phone_number(to), "Sending SMS");

            let message = OutboundMessage::new(&self.config.from_number, to, body);
            match self.client.send_message(message).await {
                Ok(response) => return Ok(response.sid),
                Err(e) => {
                    let reason = e.to_string();
                    error!(attempt = attempts, max_retries, "Twilio send failed: {}", reason);

                    if !is_retriable(&reason) {
                        return Err(DeliveryError::rejected(PROVIDER, reason));
                    }
                    if attempts >= max_retries {
                        return Err(DeliveryError::transport(
                            PROVIDER,
                            format!("failed after {} attempts: {}", attempts, reason),
                        ));
                    }

                    warn!("Retrying Twilio send after {:?}", delay);
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

/// Normalize a number to E.164 through libphonenumber metadata
pub fn to_e164(phone: &str) -> Result<String, DeliveryError> {
    phone
        .parse::<PhoneNumber>()
        .map(|parsed| parsed.format().mode(Mode::E164).to_string())
        .map_err(|e| DeliveryError::rejected(PROVIDER, format!("invalid phone number: {}", e)))
}

/// Rate limits and server errors are worth another attempt
fn is_retriable(reason: &str) -> bool {
    ["429", "rate", "500", "502", "503", "504"]
        .iter()
        .any(|marker| reason.contains(marker))
}

#[async_trait]
impl NotificationSender for TwilioSmsSender {
    async fn send(&self, contact: &Contact, code: &str) -> Result<DeliveryReceipt, DeliveryError> {
        if contact.contact_type() != ContactType::Phone {
            return Err(DeliveryError::Unsupported {
                contact_type: contact.contact_type(),
            });
        }

        let to = to_e164(contact.as_str())?;
        let body = self.template.sms_body(code);
        if body.len() > MAX_BODY_LEN {
            return Err(DeliveryError::Misconfigured {
                message: format!("SMS body exceeds {} characters", MAX_BODY_LEN),
            });
        }

        let sid = self.send_with_retry(&to, &body).await?;
        info!(provider = PROVIDER, contact = %contact.masked(), sid = %sid, "SMS accepted");
        Ok(DeliveryReceipt::new(PROVIDER, Some(sid)))
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
