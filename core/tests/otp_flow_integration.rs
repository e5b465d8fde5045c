//! End-to-end flow through the public API of the core crate

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ov_core::{
    Contact, ContactType, DeliveryError, DeliveryReceipt, InMemoryVerificationStore,
    NotificationSender, OtpService, OtpServiceConfig, StorePolicy, VerificationStore,
};

#[derive(Default)]
struct Outbox {
    messages: Mutex<Vec<(String, String)>>,
}

impl Outbox {
    fn last_code(&self) -> String {
        self.messages.lock().unwrap().last().unwrap().1.clone()
    }
}

#[async_trait]
impl NotificationSender for Outbox {
    async fn send(&self, contact: &Contact, code: &str) -> Result<DeliveryReceipt, DeliveryError> {
        self.messages
            .lock()
            .unwrap()
            .push((contact.as_str().to_string(), code.to_string()));
        Ok(DeliveryReceipt::new("outbox", None))
    }

    fn provider_name(&self) -> &str {
        "outbox"
    }
}

#[tokio::test]
async fn test_full_flow_with_trait_objects() {
    let store: Arc<dyn VerificationStore> = Arc::new(InMemoryVerificationStore::new(StorePolicy {
        code_length: 8,
        ..StorePolicy::default()
    }));
    let outbox = Arc::new(Outbox::default());
    let sender: Arc<dyn NotificationSender> = outbox.clone();
    let service = OtpService::new(store, sender, OtpServiceConfig::default());

    let issued = service
        .request_code("rider@example.com", ContactType::Email)
        .await
        .unwrap();
    assert_eq!(issued.delivery.as_str(), "delivered");

    let code = outbox.last_code();
    assert_eq!(code.len(), 8);

    let result = service.submit_code("rider@example.com", &code).await.unwrap();
    assert!(result.success());
    assert!(service.is_verified("rider@example.com").await.unwrap());

    let replay = service.submit_code("rider@example.com", &code).await.unwrap();
    assert_eq!(replay.message(), "not_found");
}

#[tokio::test]
async fn test_contacts_are_isolated() {
    let store = Arc::new(InMemoryVerificationStore::default());
    let outbox = Arc::new(Outbox::default());
    let service = OtpService::new(store, outbox.clone(), OtpServiceConfig::default());

    service
        .request_code("+14155550100", ContactType::Phone)
        .await
        .unwrap();
    let phone_code = outbox.last_code();

    service
        .request_code("rider@example.com", ContactType::Email)
        .await
        .unwrap();

    let wrong_contact = service
        .submit_code("rider@example.com", &phone_code)
        .await
        .unwrap();
    assert!(!wrong_contact.success());

    let right_contact = service.submit_code("+14155550100", &phone_code).await.unwrap();
    assert!(right_contact.success());
}
