//! Sendchamp SMS sender

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

const PROVIDER: &str = "sendchamp";

/// Sendchamp configuration
#[derive(Debug, Clone)]
pub struct SendchampConfig {
    pub api_key: String,
    pub sender_name: String,
    /// Delivery route, `non_dnd` unless overridden
    pub route: String,
    pub api_url: String,
    pub request_timeout: Duration,
}

impl SendchampConfig {
    /// Create configuration from SENDCHAMP_* environment variables
    pub fn from_env(brand_name: &str) -> Result<Self, InfrastructureError> {
        let api_key = env_string("SENDCHAMP_API_KEY")
            .ok_or_else(|| InfrastructureError::Config("SENDCHAMP_API_KEY not set".to_string()))?;

        Ok(Self {
            api_key,
            sender_name: env_string("SENDCHAMP_SENDER_NAME").unwrap_or_else(|| brand_name.to_string()),
            route: env_string("SENDCHAMP_ROUTE").unwrap_or_else(|| "non_dnd".to_string()),
            api_url: env_string("SENDCHAMP_API_URL")
                .unwrap_or_else(|| "https://api.sendchamp.com/api/v1/sms/send".to_string()),
            request_timeout: Duration::from_secs(10),
        })
    }
}

/// Body of a Sendchamp send request
#[derive(Debug, Serialize)]
pub struct SendchampMessage {
    /// Recipient digits without the leading `+`
    pub to: String,
    pub message: String,
    pub sender_name: String,
    pub route: String,
}

/// SMS sender backed by Sendchamp
pub struct SendchampSmsSender {
    client: Client,
    config: SendchampConfig,
    template: MessageTemplate,
}

impl SendchampSmsSender {
    pub fn new(config: SendchampConfig, template: MessageTemplate) -> Result<Self, InfrastructureError> {
        let client = build_client(config.request_timeout)?;
        Ok(Self {
            client,
            config,
            template,
        })
    }

    pub fn build_message(&self, phone: &str, code: &str) -> SendchampMessage {
        SendchampMessage {
            to: phone.trim_start_matches('+').to_string(),
            message: self.template.sms_body(code),
            sender_name: self.config.sender_name.clone(),
            route: self.config.route.clone(),
        }
    }
}

/// Message id from a Sendchamp reply, found under `data.id`
pub(crate) fn message_id(data: &Value) -> Option<String> {
    data.pointer("/data/id").and_then(|id| match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[async_trait]
impl NotificationSender for SendchampSmsSender {
    async fn send(&self, contact: &Contact, code: &str) -> Result<DeliveryReceipt, DeliveryError> {
        if contact.contact_type() != ContactType::Phone {
            return Err(DeliveryError::Unsupported {
                contact_type: contact.contact_type(),
            });
        }

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&self.build_message(contact.as_str(), code))
            .send()
            .await
            .map_err(|e| DeliveryError::transport(PROVIDER, e.to_string()))?;

        let data = read_response(PROVIDER, response).await?;

        info!(provider = PROVIDER, contact = %contact.masked(), "SMS accepted");
        Ok(DeliveryReceipt::new(PROVIDER, message_id(&data)))
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
