//! Business services containing domain logic and use cases.

pub mod clock;
pub mod notification;
pub mod otp;
pub mod retention;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use notification::{DeliveryReceipt, NotificationSender};
pub use otp::{DeliveryStatus, OtpService, OtpServiceConfig, RequestCodeResult, VerifyCodeResult};
pub use retention::{CleanupResult, RetentionConfig, RetentionService};
