//! Out-of-band delivery of issued codes

mod traits;

pub use traits::{DeliveryReceipt, NotificationSender};
