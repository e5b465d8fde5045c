//! Notification provider selection
//!
//! Provider credentials are read by the infrastructure crate next to the
//! client that uses them; this module only decides which provider handles
//! each contact type.

use serde::{Deserialize, Serialize};

use super::env_string;
use crate::errors::ConfigError;

/// Email delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Print messages to stdout (development)
    #[default]
    Console,
    /// Resend HTTPS API
    Resend,
    /// Direct SMTP relay
    Smtp,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "mock" => Ok(EmailProvider::Console),
            "resend" => Ok(EmailProvider::Resend),
            "smtp" => Ok(EmailProvider::Smtp),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMS delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Print messages to stdout (development)
    #[default]
    Console,
    /// Sendchamp HTTPS API
    Sendchamp,
    /// Twilio Messaging API
    Twilio,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "mock" => Ok(SmsProvider::Console),
            "sendchamp" => Ok(SmsProvider::Sendchamp),
            "twilio" => Ok(SmsProvider::Twilio),
            _ => Err(format!("Invalid SMS provider: {}", s)),
        }
    }
}

/// Which provider delivers each contact type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    pub email_provider: EmailProvider,
    pub sms_provider: SmsProvider,

    /// Brand shown in message bodies and sender names
    pub brand_name: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            email_provider: EmailProvider::default(),
            sms_provider: SmsProvider::default(),
            brand_name: String::from("YNOW"),
        }
    }
}

impl NotificationConfig {
    /// Create from EMAIL_PROVIDER, SMS_PROVIDER and BRAND_NAME
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            email_provider: parse_provider("EMAIL_PROVIDER", defaults.email_provider)?,
            sms_provider: parse_provider("SMS_PROVIDER", defaults.sms_provider)?,
            brand_name: env_string("BRAND_NAME").unwrap_or(defaults.brand_name),
        })
    }
}

fn parse_provider<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = String>,
{
    match env_string(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("Resend".parse::<EmailProvider>().unwrap(), EmailProvider::Resend);
        assert_eq!("mock".parse::<EmailProvider>().unwrap(), EmailProvider::Console);
        assert_eq!("sendchamp".parse::<SmsProvider>().unwrap(), SmsProvider::Sendchamp);
        assert_eq!("TWILIO".parse::<SmsProvider>().unwrap(), SmsProvider::Twilio);
        assert!("carrier-pigeon".parse::<SmsProvider>().is_err());
    }
}
