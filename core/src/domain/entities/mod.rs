//! Domain entities representing core business objects.

pub mod contact;
pub mod otp_record;

// Re-export commonly used types
pub use contact::{Contact, ContactType};
pub use otp_record::{generate_code, generate_code_excluding, OtpRecord, RecordState};

#[cfg(test)]
mod tests;
