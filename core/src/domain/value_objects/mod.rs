//! Value objects representing immutable domain concepts.

pub mod issued_code;
pub mod verify_outcome;

// Re-export commonly used types
pub use issued_code::IssuedCode;
pub use verify_outcome::VerifyOutcome;
