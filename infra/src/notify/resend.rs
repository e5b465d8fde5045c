//! Resend email sender
//!
//! Posts to the Resend HTTPS API with a bearer key. The reply's `id` becomes
//! the provider message id.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use ov_core::domain::{Contact, ContactType};
use ov_core::errors::DeliveryError;
use ov_core::services::notification::{DeliveryReceipt, NotificationSender};
use ov_shared::config::env_string;

use super::http::{build_client, read_response};
use super::template::MessageTemplate;
use crate::InfrastructureError;

const PROVIDER: &str = "resend";

/// Resend configuration
#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    /// Sender, e.g. `YNOW <onboarding@resend.dev>`
    pub from: String,
    pub api_url: String,
    pub request_timeout: Duration,
}

impl ResendConfig {
    /// Create configuration from RESEND_API_KEY, RESEND_FROM and RESEND_API_URL
    pub fn from_env(brand_name: &str) -> Result<Self, InfrastructureError> {
        let api_key = env_string("RESEND_API_KEY")
            .ok_or_else(|| InfrastructureError::Config("RESEND_API_KEY not set".to_string()))?;

        Ok(Self {
            api_key,
            from: env_string("RESEND_FROM")
                .unwrap_or_else(|| format!("{} <onboarding@resend.dev>", brand_name)),
            api_url: env_string("RESEND_API_URL")
                .unwrap_or_else(|| "https://api.resend.com/emails".to_string()),
            request_timeout: Duration::from_secs(10),
        })
    }
}

/// Body of a Resend send request
#[derive(Debug, Serialize)]
pub struct ResendEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Email sender backed by Resend
pub struct ResendEmailSender {
    client: Client,
    config: ResendConfig,
    template: MessageTemplate,
}

impl ResendEmailSender {
    pub fn new(config: ResendConfig, template: MessageTemplate) -> Result<Self, InfrastructureError> {
        let client = build_client(config.request_timeout)?;
        Ok(Self {
            client,
            config,
            template,
        })
    }

    pub fn build_email(&self, to: &str, code: &str) -> ResendEmail {
        ResendEmail {
            from: self.config.from.clone(),
            to: vec![to.to_string()],
            subject: self.template.email_subject(),
            html: self.template.email_html(code),
            text: self.template.email_text(code),
        }
    }
}

#[async_trait]
impl NotificationSender for ResendEmailSender {
    async fn send(&self, contact: &Contact, code: &str) -> Result<DeliveryReceipt, DeliveryError> {
        if contact.contact_type() != ContactType::Email {
            return Err(DeliveryError::Unsupported {
                contact_type: contact.contact_type(),
            });
        }

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&self.build_email(contact.as_str(), code))
            .send()
            .await
            .map_err(|e| DeliveryError::transport(PROVIDER, e.to_string()))?;

        let data = read_response(PROVIDER, response).await?;
        let message_id = data.get("id").and_then(Value::as_str).map(str::to_string);

        info!(provider = PROVIDER, contact = %contact.masked(), "Email accepted");
        Ok(DeliveryReceipt::new(PROVIDER, message_id))
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
