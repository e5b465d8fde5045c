//! Route handlers
//!
//! - `otp` - code request, verification and status lookup
//! - `health` - liveness and store reachability

pub mod health;
pub mod otp;
