//! End-to-end tests of the OTP routes over the in-memory store

#[macro_use]
mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::{state_with, wrong_code, RecordingSender};

#[actix_web::test]
async fn test_email_scenario_mismatch_success_then_not_found() {
    let sender = Arc::new(RecordingSender::default());
    let app = init_app!(state_with(sender.clone()));

    let req = test::TestRequest::post()
        .uri("/otp/request")
        .set_json(json!({"contact": "driver@example.com", "contactType": "email"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["delivery"], "delivered");
    assert!(body["expiresAt"].as_str().is_some());
    assert!(body.get("note").is_none());

    let code = sender.last_code("driver@example.com");

    let req = test::TestRequest::post()
        .uri("/otp/verify")
        .set_json(json!({"contact": "driver@example.com", "otpCode": wrong_code(&code)}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"success": false, "message": "mismatch", "remainingAttempts": 4}));

    let req = test::TestRequest::post()
        .uri("/otp/verify")
        .set_json(json!({"contact": "driver@example.com", "otpCode": code}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"success": true, "message": "success"}));

    let req = test::TestRequest::post()
        .uri("/otp/verify")
        .set_json(json!({"contact": "driver@example.com", "otpCode": code}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"success": false, "message": "not_found"}));
}

#[actix_web::test]
async fn test_invalid_email_is_rejected() {
    let app = init_app!(state_with(Arc::new(RecordingSender::default())));

    let req = test::TestRequest::post()
        .uri("/otp/request")
        .set_json(json!({"contact": "not-an-email", "contactType": "email"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_input");
}

#[actix_web::test]
async fn test_missing_and_unknown_fields_are_invalid_input() {
    let app = init_app!(state_with(Arc::new(RecordingSender::default())));

    let cases = [
        json!({"contact": "driver@example.com"}),
        json!({"contactType": "email"}),
        json!({"contact": "driver@example.com", "contactType": "fax"}),
    ];
    for payload in cases {
        let req = test::TestRequest::post()
            .uri("/otp/request")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {}", payload);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_input");
        assert!(body["message"].as_str().is_some());
    }

    let req = test::TestRequest::post()
        .uri("/otp/verify")
        .set_json(json!({"contact": "driver@example.com", "otpCode": "  "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_json_is_invalid_input() {
    let app = init_app!(state_with(Arc::new(RecordingSender::default())));

    let req = test::TestRequest::post()
        .uri("/otp/request")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"contact\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_input");
}

#[actix_web::test]
async fn test_wrong_method_is_405() {
    let app = init_app!(state_with(Arc::new(RecordingSender::default())));

    for uri in ["/otp/request", "/otp/verify", "/api/send-otp"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"success": false, "error": "method_not_allowed"}));
    }
}

#[actix_web::test]
async fn test_legacy_routes_share_the_flow() {
    let sender = Arc::new(RecordingSender::default());
    let app = init_app!(state_with(sender.clone()));

    let req = test::TestRequest::post()
        .uri("/api/send-otp")
        .set_json(json!({"contact": "+234 801 234 5678", "contactType": "phone"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let code = sender.last_code("+2348012345678");
    let req = test::TestRequest::post()
        .uri("/api/verify-otp")
        .set_json(json!({"contact": "+2348012345678", "otpCode": code}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
}

#[actix_web::test]
async fn test_failed_delivery_still_issues_a_code() {
    let sender = Arc::new(RecordingSender::failing());
    let app = init_app!(state_with(sender.clone()));

    let req = test::TestRequest::post()
        .uri("/otp/request")
        .set_json(json!({"contact": "driver@example.com", "contactType": "email"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["delivery"], "failed");
    let note = body["note"].as_str().unwrap();
    assert!(note.contains("rejected"));
    assert!(!note.contains("quota"));

    let req = test::TestRequest::post()
        .uri("/otp/verify")
        .set_json(json!({
            "contact": "driver@example.com",
            "otpCode": sender.last_code("driver@example.com")
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
}

#[actix_web::test]
async fn test_status_reports_verification() {
    let sender = Arc::new(RecordingSender::default());
    let app = init_app!(state_with(sender.clone()));

    let req = test::TestRequest::get()
        .uri("/otp/status?contact=driver%40example.com")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"contact": "d****r@example.com", "verified": false}));

    let req = test::TestRequest::post()
        .uri("/otp/request")
        .set_json(json!({"contact": "driver@example.com", "contactType": "email"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/otp/verify")
        .set_json(json!({
            "contact": "driver@example.com",
            "otpCode": sender.last_code("driver@example.com")
        }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/otp/status?contact=driver%40example.com")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["verified"], true);

    let req = test::TestRequest::get().uri("/otp/status").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
