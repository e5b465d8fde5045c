//! Repository interfaces and the in-process store implementation.

pub mod verification_store;

pub use verification_store::{InMemoryVerificationStore, StorePolicy, VerificationStore};
