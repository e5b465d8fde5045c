//! Verification store contract and the in-process implementation.

mod r#trait;
pub use r#trait::VerificationStore;

mod memory;
pub use memory::InMemoryVerificationStore;

mod policy;
pub use policy::StorePolicy;
