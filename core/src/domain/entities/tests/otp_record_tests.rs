//! Unit tests for the OTP record state machine and code generation

use std::collections::HashSet;

use chrono::{Duration, Utc};

use crate::domain::entities::{
    generate_code, generate_code_excluding, Contact, ContactType, OtpRecord, RecordState,
};
use crate::domain::VerifyOutcome;

fn record(code: &str) -> OtpRecord {
    let contact = Contact::parse("driver@example.com", ContactType::Email).unwrap();
    OtpRecord::new(&contact, code.to_string(), Duration::seconds(300), Utc::now())
}

#[test]
fn test_generate_code_format() {
    for length in [4, 6, 10] {
        for _ in 0..50 {
            let code = generate_code(length);
            assert_eq!(code.len(), length);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}

#[test]
fn test_generated_codes_vary() {
    let codes: HashSet<String> = (0..100).map(|_| generate_code(6)).collect();
    assert!(codes.len() > 1);
}

#[test]
fn test_generate_code_excluding_never_repeats() {
    // With 4 digits a collision would show up quickly if exclusion were broken
    for _ in 0..200 {
        let code = generate_code_excluding(4, Some("1234"));
        assert_ne!(code, "1234");
    }
}

#[test]
fn test_correct_code_consumes_once() {
    let mut rec = record("123456");
    let now = Utc::now();

    assert_eq!(rec.check("123456", 5, now), VerifyOutcome::Success);
    assert_eq!(rec.state, RecordState::Consumed);
    assert_eq!(rec.consumed_at, Some(now));

    assert_eq!(rec.check("123456", 5, now), VerifyOutcome::NotFound);
    assert_eq!(rec.consumed_at, Some(now));
}

#[test]
fn test_mismatch_counts_down_then_locks() {
    let mut rec = record("123456");
    let now = Utc::now();

    assert_eq!(
        rec.check("000000", 3, now),
        VerifyOutcome::Mismatch {
            remaining_attempts: 2
        }
    );
    assert_eq!(
        rec.check("000001", 3, now),
        VerifyOutcome::Mismatch {
            remaining_attempts: 1
        }
    );
    assert_eq!(rec.check("000002", 3, now), VerifyOutcome::Locked);
    assert_eq!(rec.state, RecordState::Locked);

    // Locked is terminal even for the right code
    assert_eq!(rec.check("123456", 3, now), VerifyOutcome::Locked);
}

#[test]
fn test_expired_record_rejects_correct_code() {
    let mut rec = record("123456");
    let later = rec.expires_at + Duration::seconds(1);

    assert_eq!(rec.check("123456", 5, later), VerifyOutcome::Expired);
    assert_eq!(rec.state, RecordState::Active);
    assert_eq!(rec.attempts, 0);
}

#[test]
fn test_expiry_boundary_is_inclusive() {
    let rec = record("123456");
    assert!(!rec.is_expired_at(rec.expires_at));
    assert!(rec.is_expired_at(rec.expires_at + Duration::milliseconds(1)));
}

#[test]
fn test_locked_takes_precedence_over_expired() {
    let mut rec = record("123456");
    rec.state = RecordState::Locked;
    let later = rec.expires_at + Duration::seconds(1);
    assert_eq!(rec.check("123456", 5, later), VerifyOutcome::Locked);
}

#[test]
fn test_malformed_code_counts_as_attempt() {
    let mut rec = record("123456");
    let outcome = rec.check("12ab", 5, Utc::now());
    assert_eq!(
        outcome,
        VerifyOutcome::Mismatch {
            remaining_attempts: 4
        }
    );
    assert_eq!(rec.attempts, 1);
}

#[test]
fn test_debug_redacts_code() {
    let rec = record("987654");
    let debug = format!("{:?}", rec);
    assert!(!debug.contains("987654"));
    assert!(!debug.contains("driver@example.com"));
}

#[test]
fn test_record_state_round_trip_names() {
    for state in [
        RecordState::Active,
        RecordState::Consumed,
        RecordState::Locked,
        RecordState::Superseded,
    ] {
        assert_eq!(RecordState::parse(state.as_str()), Some(state));
    }
    assert_eq!(RecordState::parse("pending"), None);
}
