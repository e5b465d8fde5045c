use std::time::Duration;

use ov_core::domain::{Contact, ContactType};
use ov_core::errors::DeliveryError;
use ov_core::services::notification::NotificationSender;
use serde_json::json;

use crate::notify::sendchamp::message_id;
use crate::notify::{
    MessageTemplate, ResendConfig, ResendEmailSender, SendchampConfig, SendchampSmsSender,
};

/// Nothing listens on port 1
const UNREACHABLE: &str = "http://127.0.0.1:1/send";

fn resend() -> ResendEmailSender {
    let config = ResendConfig {
        api_key: "re_test".to_string(),
        from: "YNOW <onboarding@resend.dev>".to_string(),
        api_url: UNREACHABLE.to_string(),
        request_timeout: Duration::from_secs(2),
    };
    ResendEmailSender::new(config, MessageTemplate::default()).unwrap()
}

fn sendchamp() -> SendchampSmsSender {
    let config = SendchampConfig {
        api_key: "sc_test".to_string(),
        sender_name: "YNOW".to_string(),
        route: "non_dnd".to_string(),
        api_url: UNREACHABLE.to_string(),
        request_timeout: Duration::from_secs(2),
    };
    SendchampSmsSender::new(config, MessageTemplate::default()).unwrap()
}

#[test]
fn test_resend_payload() {
    let email = resend().build_email("driver@example.com", "482913");
    let body = serde_json::to_value(&email).unwrap();

    assert_eq!(body["from"], "YNOW <onboarding@resend.dev>");
    assert_eq!(body["to"], json!(["driver@example.com"]));
    assert_eq!(body["subject"], "Your YNOW Verification Code");
    assert!(body["html"].as_str().unwrap().contains("482913"));
    assert!(body["text"].as_str().unwrap().contains("482913"));
}

#[test]
fn test_sendchamp_payload_strips_plus() {
    let message = sendchamp().build_message("+2348012345678", "482913");
    let body = serde_json::to_value(&message).unwrap();

    assert_eq!(body["to"], "2348012345678");
    assert_eq!(body["sender_name"], "YNOW");
    assert_eq!(body["route"], "non_dnd");
    assert!(body["message"].as_str().unwrap().contains("482913"));
}

#[test]
fn test_sendchamp_message_id() {
    assert_eq!(
        message_id(&json!({"status": "success", "data": {"id": "msg-1"}})),
        Some("msg-1".to_string())
    );
    assert_eq!(message_id(&json!({"data": {"id": 42}})), Some("42".to_string()));
    assert_eq!(message_id(&json!({"status": "success"})), None);
}

#[tokio::test]
async fn test_senders_refuse_the_other_channel() {
    let phone = Contact::parse("+2348012345678", ContactType::Phone).unwrap();
    let err = resend().send(&phone, "123456").await.unwrap_err();
    assert_eq!(err.kind(), "unsupported");

    let email = Contact::parse("driver@example.com", ContactType::Email).unwrap();
    let err = sendchamp().send(&email, "123456").await.unwrap_err();
    assert_eq!(err.kind(), "unsupported");
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_error() {
    let email = Contact::parse("driver@example.com", ContactType::Email).unwrap();
    let err = resend().send(&email, "123456").await.unwrap_err();

    assert!(matches!(err, DeliveryError::Transport { ref provider, .. } if provider == "resend"));
    assert!(err.is_transient());
    assert!(!err.to_string().contains("123456"));
}
