//! Shared fixtures for route tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;

use ov_api::AppState;
use ov_core::domain::Contact;
use ov_core::errors::DeliveryError;
use ov_core::repositories::{InMemoryVerificationStore, StorePolicy, VerificationStore};
use ov_core::services::{DeliveryReceipt, NotificationSender, OtpService, OtpServiceConfig};

/// Sender that remembers the last code per contact, optionally failing
#[derive(Default)]
pub struct RecordingSender {
    codes: Mutex<HashMap<String, String>>,
    fail: bool,
}

impl RecordingSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn last_code(&self, contact: &str) -> String {
        self.codes
            .lock()
            .unwrap()
            .get(contact)
            .cloned()
            .expect("no code was sent to this contact")
    }
}

#[async_trait]
impl NotificationSender for RecordingSender {
    async fn send(&self, contact: &Contact, code: &str) -> Result<DeliveryReceipt, DeliveryError> {
        self.codes
            .lock()
            .unwrap()
            .insert(contact.as_str().to_string(), code.to_string());

        if self.fail {
            Err(DeliveryError::rejected("recording", "quota exceeded"))
        } else {
            Ok(DeliveryReceipt::new("recording", None))
        }
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}

pub fn state_with(sender: Arc<RecordingSender>) -> web::Data<AppState> {
    let store: Arc<dyn VerificationStore> =
        Arc::new(InMemoryVerificationStore::new(StorePolicy::default()));
    let sender: Arc<dyn NotificationSender> = sender;
    web::Data::new(AppState::new(OtpService::new(
        store,
        sender,
        OtpServiceConfig::default(),
    )))
}

/// Same length as `code`, never equal to it
pub fn wrong_code(code: &str) -> String {
    let mut chars: Vec<char> = code.chars().collect();
    let last = chars.len() - 1;
    chars[last] = if chars[last] == '0' { '1' } else { '0' };
    chars.into_iter().collect()
}

/// Mount the production route table over `state`

macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state)
                .app_data(ov_api::json_config(16 * 1024))
                .configure(ov_api::configure),
        )
        .await
    };
}
