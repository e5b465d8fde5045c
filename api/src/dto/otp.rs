use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use ov_core::services::{RequestCodeResult, VerifyCodeResult};

/// Body of `POST /otp/request`
///
/// Fields default to empty so a missing field reports through validation
/// like a blank one.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequestCodeRequest {
    /// Email address or phone number
    #[serde(default)]
    #[validate(length(min = 1, message = "contact is required"))]
    pub contact: String,

    /// `email` or `phone`
    #[serde(default)]
    #[validate(length(min = 1, message = "contactType is required"))]
    pub contact_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCodeResponse {
    pub success: bool,
    pub expires_at: DateTime<Utc>,
    /// `delivered` or `failed`
    pub delivery: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<RequestCodeResult> for RequestCodeResponse {
    fn from(result: RequestCodeResult) -> Self {
        Self {
            success: true,
            expires_at: result.expires_at,
            delivery: result.delivery.as_str().to_string(),
            note: result.delivery.note(),
        }
    }
}

/// Body of `POST /otp/verify`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "contact is required"))]
    pub contact: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "otpCode is required"))]
    pub otp_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeResponse {
    pub success: bool,
    /// `success`, `mismatch`, `not_found`, `expired` or `locked`
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
}

impl From<VerifyCodeResult> for VerifyCodeResponse {
    fn from(result: VerifyCodeResult) -> Self {
        Self {
            success: result.success(),
            message: result.message().to_string(),
            remaining_attempts: result.remaining_attempts(),
        }
    }
}

/// Query of `GET /otp/status`
#[derive(Debug, Clone, Deserialize)]
pub struct StatusQuery {
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Masked contact
    pub contact: String,
    pub verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ov_core::domain::VerifyOutcome;

    #[test]
    fn test_request_validation() {
        let request: RequestCodeRequest =
            serde_json::from_str(r#"{"contact": "driver@example.com"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("contact_type"));

        let request: RequestCodeRequest = serde_json::from_str(
            r#"{"contact": "driver@example.com", "contactType": "email"}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_verify_response_shape() {
        let body = serde_json::to_value(VerifyCodeResponse::from(VerifyCodeResult {
            outcome: VerifyOutcome::Mismatch {
                remaining_attempts: 4,
            },
        }))
        .unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "mismatch");
        assert_eq!(body["remainingAttempts"], 4);

        let body = serde_json::to_value(VerifyCodeResponse::from(VerifyCodeResult {
            outcome: VerifyOutcome::Success,
        }))
        .unwrap();
        assert_eq!(body["success"], true);
        assert!(body.get("remainingAttempts").is_none());
    }
}
