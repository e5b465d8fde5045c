//! OTP route handlers

pub mod request_code;
pub mod status;
pub mod verify_code;

pub use request_code::request_code;
pub use status::status;
pub use verify_code::verify_code;
