//! OTP coordinator: issue, deliver and verify single-use codes
//!
//! This module ties a [`VerificationStore`](crate::repositories::VerificationStore)
//! to a [`NotificationSender`](crate::services::notification::NotificationSender):
//! - contact validation against the declared type
//! - issuance bounded by the store timeout
//! - delivery bounded by the delivery timeout, failures reported as a note
//! - verification mapped to stable outcome codes

mod config;
mod service;
mod types;


pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use types::{DeliveryStatus, RequestCodeResult, VerifyCodeResult};
