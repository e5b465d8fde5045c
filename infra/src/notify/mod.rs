//! Notification senders
//!
//! Each provider implements `NotificationSender` for one channel:
//! - **Email**: console, Resend and SMTP (`smtp-email` feature)
//! - **SMS**: console, Sendchamp and Twilio (`twilio-sms` feature)
//!
//! [`ContactRouter`] combines one sender per channel and is what the
//! coordinator receives.

pub mod console;
mod http;
pub mod resend;
pub mod router;
pub mod sendchamp;
pub mod template;

#[cfg(feature = "smtp-email")]
pub mod smtp;
#[cfg(feature = "twilio-sms")]
pub mod twilio;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::{info, warn};

use ov_core::services::notification::NotificationSender;
use ov_shared::{AppConfig, EmailProvider, SmsProvider};

use crate::InfrastructureError;

pub use console::ConsoleSender;
pub use resend::{ResendConfig, ResendEmailSender};
pub use router::ContactRouter;
pub use sendchamp::{SendchampConfig, SendchampSmsSender};
pub use template::MessageTemplate;

#[cfg(feature = "smtp-email")]
pub use smtp::{SmtpConfig, SmtpEmailSender};
#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsSender};

/// Build the router for the configured email and SMS providers
///
/// Outside production a provider that cannot be built is replaced by the
/// console sender with a warning. In production the error is returned.
pub fn create_notification_sender(
    config: &AppConfig,
) -> Result<Arc<dyn NotificationSender>, InfrastructureError> {
    let template = MessageTemplate::new(
        config.notification.brand_name.clone(),
        config.otp.ttl_minutes(),
    );
    let production = config.environment.is_production();

    let email = with_fallback(
        "email",
        build_email_sender(config.notification.email_provider, &template),
        production,
        &template,
    )?;
    let sms = with_fallback(
        "sms",
        build_sms_sender(config.notification.sms_provider, &template),
        production,
        &template,
    )?;

    let router = ContactRouter::new().with_email(email).with_sms(sms);
    info!(providers = %router.describe(), "Notification senders ready");
    Ok(Arc::new(router))
}

fn with_fallback(
    channel: &str,
    built: Result<Arc<dyn NotificationSender>, InfrastructureError>,
    production: bool,
    template: &MessageTemplate,
) -> Result<Arc<dyn NotificationSender>, InfrastructureError> {
    match built {
        Ok(sender) => Ok(sender),
        Err(e) if production => Err(e),
        Err(e) => {
            warn!(channel, "Sender unavailable ({}), falling back to console", e);
            Ok(Arc::new(ConsoleSender::new(template.clone())))
        }
    }
}

fn build_email_sender(
    provider: EmailProvider,
    template: &MessageTemplate,
) -> Result<Arc<dyn NotificationSender>, InfrastructureError> {
    match provider {
        EmailProvider::Console => Ok(Arc::new(ConsoleSender::new(template.clone()))),
        EmailProvider::Resend => {
            let config = ResendConfig::from_env(template.brand_name())?;
            Ok(Arc::new(ResendEmailSender::new(config, template.clone())?))
        }
        #[cfg(feature = "smtp-email")]
        EmailProvider::Smtp => {
            let config = SmtpConfig::from_env()?;
            Ok(Arc::new(SmtpEmailSender::new(config, template.clone())?))
        }
        #[cfg(not(feature = "smtp-email"))]
        EmailProvider::Smtp => Err(InfrastructureError::Config(
            "EMAIL_PROVIDER=smtp requires the smtp-email feature".to_string(),
        )),
    }
}

fn build_sms_sender(
    provider: SmsProvider,
    template: &MessageTemplate,
) -> Result<Arc<dyn NotificationSender>, InfrastructureError> {
    match provider {
        SmsProvider::Console => Ok(Arc::new(ConsoleSender::new(template.clone()))),
        SmsProvider::Sendchamp => {
            let config = SendchampConfig::from_env(template.brand_name())?;
            Ok(Arc::new(SendchampSmsSender::new(config, template.clone())?))
        }
        #[cfg(feature = "twilio-sms")]
        SmsProvider::Twilio => {
            let config = TwilioConfig::from_env()?;
            Ok(Arc::new(TwilioSmsSender::new(config, template.clone())))
        }
        #[cfg(not(feature = "twilio-sms"))]
        SmsProvider::Twilio => Err(InfrastructureError::Config(
            "SMS_PROVIDER=twilio requires the twilio-sms feature".to_string(),
        )),
    }
}
