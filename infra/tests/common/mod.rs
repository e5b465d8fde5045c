//! Behaviour every verification store backend must share
//!
//! Each function drives one scenario against a live store. Contacts carry a
//! random tag so runs against a shared server do not collide.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use ov_core::domain::{Contact, ContactType, VerifyOutcome};
use ov_core::repositories::VerificationStore;
use ov_core::services::clock::ManualClock;

pub fn unique_email() -> Contact {
    let raw = format!("driver-{}@example.com", Uuid::new_v4().simple());
    Contact::parse(&raw, ContactType::Email).unwrap()
}

pub fn wrong_code(code: &str) -> String {
    let mut chars: Vec<char> = code.chars().collect();
    let last = chars.len() - 1;
    chars[last] = if chars[last] == '0' { '1' } else { '0' };
    chars.into_iter().collect()
}

pub async fn round_trip<S: VerificationStore + ?Sized>(store: &S) {
    let contact = unique_email();
    assert!(!store.is_verified(&contact).await.unwrap());

    let issued = store.issue(&contact).await.unwrap();
    let outcome = store.verify(&contact, &wrong_code(issued.code())).await.unwrap();
    assert!(matches!(outcome, VerifyOutcome::Mismatch { .. }));

    assert_eq!(
        store.verify(&contact, issued.code()).await.unwrap(),
        VerifyOutcome::Success
    );
    assert_eq!(
        store.verify(&contact, issued.code()).await.unwrap(),
        VerifyOutcome::NotFound
    );
    assert!(store.is_verified(&contact).await.unwrap());
}

pub async fn supersede<S: VerificationStore + ?Sized>(store: &S) {
    let contact = unique_email();
    let first = store.issue(&contact).await.unwrap();
    let second = store.issue(&contact).await.unwrap();
    assert_ne!(first.code(), second.code());

    let stale = store.verify(&contact, first.code()).await.unwrap();
    assert!(!stale.is_success());
    assert_eq!(
        store.verify(&contact, second.code()).await.unwrap(),
        VerifyOutcome::Success
    );
}

pub async fn lockout<S: VerificationStore + ?Sized>(store: &S, max_attempts: u32) {
    let contact = unique_email();
    let issued = store.issue(&contact).await.unwrap();
    let wrong = wrong_code(issued.code());

    for remaining in (1..max_attempts).rev() {
        assert_eq!(
            store.verify(&contact, &wrong).await.unwrap(),
            VerifyOutcome::Mismatch {
                remaining_attempts: remaining
            }
        );
    }
    assert_eq!(store.verify(&contact, &wrong).await.unwrap(), VerifyOutcome::Locked);
    assert_eq!(
        store.verify(&contact, issued.code()).await.unwrap(),
        VerifyOutcome::Locked
    );
}

pub async fn expiry<S: VerificationStore + ?Sized>(store: &S, clock: &ManualClock, ttl: Duration) {
    let contact = unique_email();
    let issued = store.issue(&contact).await.unwrap();

    clock.advance(ttl + Duration::seconds(1));
    assert_eq!(
        store.verify(&contact, issued.code()).await.unwrap(),
        VerifyOutcome::Expired
    );
}

pub async fn concurrent_verify<S: VerificationStore + ?Sized + 'static>(store: Arc<S>) {
    let contact = unique_email();
    let issued = store.issue(&contact).await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            let contact = contact.clone();
            let code = issued.code().to_string();
            tokio::spawn(async move { store.verify(&contact, &code).await.unwrap() })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_success() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
}

/// Back-to-back issues with the clock standing still; the second code wins
pub async fn reissue_in_same_instant<S: VerificationStore + ?Sized>(store: &S) {
    for _ in 0..10 {
        let contact = unique_email();
        let first = store.issue(&contact).await.unwrap();
        let second = store.issue(&contact).await.unwrap();
        assert_ne!(first.code(), second.code());

        assert_eq!(
            store.verify(&contact, second.code()).await.unwrap(),
            VerifyOutcome::Success
        );
        assert!(store.is_verified(&contact).await.unwrap());
    }
}

/// Racing issues leave exactly one working code
///
/// Fewer racers than the attempt limit, so the stale codes cannot lock the
/// surviving record before its own code is tried.
pub async fn concurrent_issue<S: VerificationStore + ?Sized + 'static>(store: Arc<S>) {
    let contact = unique_email();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            let contact = contact.clone();
            tokio::spawn(async move { store.issue(&contact).await.unwrap() })
        })
        .collect();

    let mut codes = Vec::new();
    for handle in handles {
        codes.push(handle.await.unwrap().code().to_string());
    }

    let mut successes = 0;
    for code in &codes {
        if store.verify(&contact, code).await.unwrap().is_success() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
}
