//! PostgreSQL-backed verification store
//!
//! Records live in `otp_verifications`, one row per issued code, with only a
//! digest of the code stored. Every mutation runs in a transaction holding
//! `pg_advisory_xact_lock` on the contact, which serializes issue and verify
//! per contact; the partial unique index on current rows backs that up.
//!
//! "Latest" always means highest `seq`, assigned by the database at insert.
//! `created_at` comes from the service clock and is never used for ordering.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Postgres, Row, Transaction};
use tracing::debug;
use uuid::Uuid;

use ov_core::domain::{
    generate_code, generate_code_excluding, Contact, ContactType, IssuedCode, OtpRecord,
    RecordState, VerifyOutcome,
};
use ov_core::errors::{DomainError, DomainResult};
use ov_core::repositories::{StorePolicy, VerificationStore};
use ov_core::services::clock::{Clock, SystemClock};

use super::hash_code;
use crate::database::DatabasePool;
use crate::InfrastructureError;

const SELECT_LATEST: &str = r#"
SELECT id, contact, contact_type, code_hash, attempts, state,
       created_at, expires_at, consumed_at
FROM otp_verifications
WHERE contact = $1
ORDER BY seq DESC
LIMIT 1
"#;

/// The one record `verify` may act on; superseded and consumed rows are absent
const SELECT_CURRENT_FOR_UPDATE: &str = r#"
SELECT id, contact, contact_type, code_hash, attempts, state,
       created_at, expires_at, consumed_at
FROM otp_verifications
WHERE contact = $1 AND state IN ('active', 'locked')
ORDER BY seq DESC
LIMIT 1
FOR UPDATE
"#;

/// Verification store backed by PostgreSQL
pub struct PostgresVerificationStore {
    pool: DatabasePool,
    policy: StorePolicy,
    clock: Arc<dyn Clock>,
}

impl PostgresVerificationStore {
    pub fn new(pool: DatabasePool, policy: StorePolicy) -> Self {
        Self::with_clock(pool, policy, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: DatabasePool, policy: StorePolicy, clock: Arc<dyn Clock>) -> Self {
        Self { pool, policy, clock }
    }

    /// Open a transaction that holds the per-contact advisory lock
    async fn lock_contact(&self, contact: &Contact) -> DomainResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.get_pool().begin().await.map_err(db_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(contact.as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        Ok(tx)
    }
}

fn db_error(err: sqlx::Error) -> DomainError {
    InfrastructureError::Database(err).into()
}

/// Rebuild a record from a row; `code` holds the stored digest
fn record_from_row(row: &PgRow) -> Result<OtpRecord, InfrastructureError> {
    let contact_type: String = row.try_get("contact_type")?;
    let state: String = row.try_get("state")?;
    let attempts: i32 = row.try_get("attempts")?;

    Ok(OtpRecord {
        id: row.try_get("id")?,
        contact: row.try_get("contact")?,
        contact_type: contact_type
            .parse::<ContactType>()
            .map_err(|_| InfrastructureError::Corrupt(format!("contact_type {:?}", contact_type)))?,
        code: row.try_get("code_hash")?,
        attempts: u32::try_from(attempts)
            .map_err(|_| InfrastructureError::Corrupt(format!("attempts {}", attempts)))?,
        created_at: row.try_get("created_at")?,
        expires_at: row.try_get("expires_at")?,
        state: RecordState::parse(&state)
            .ok_or_else(|| InfrastructureError::Corrupt(format!("state {:?}", state)))?,
        consumed_at: row.try_get("consumed_at")?,
    })
}

#[async_trait]
impl VerificationStore for PostgresVerificationStore {
    async fn issue(&self, contact: &Contact) -> DomainResult<IssuedCode> {
        let mut tx = self.lock_contact(contact).await?;

        let previous_hash: Option<String> = sqlx::query_scalar(
            "SELECT code_hash FROM otp_verifications WHERE contact = $1 ORDER BY seq DESC LIMIT 1",
        )
        .bind(contact.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;

        let mut code = generate_code(self.policy.code_length);
        let mut code_hash = hash_code(contact.as_str(), &code);
        while previous_hash.as_deref() == Some(code_hash.as_str()) {
            code = generate_code_excluding(self.policy.code_length, Some(&code));
            code_hash = hash_code(contact.as_str(), &code);
        }

        let superseded = sqlx::query(
            "UPDATE otp_verifications SET state = 'superseded' \
             WHERE contact = $1 AND state IN ('active', 'locked')",
        )
        .bind(contact.as_str())
        .execute(&mut *tx)
        .await
        .map_err(db_error)?
        .rows_affected();

        let now = self.clock.now();
        let expires_at = now + self.policy.ttl;

        sqlx::query(
            r#"
            INSERT INTO otp_verifications
                (id, contact, contact_type, code_hash, attempts, state, verified, created_at, expires_at)
            VALUES ($1, $2, $3, $4, 0, 'active', FALSE, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(contact.as_str())
        .bind(contact.contact_type().as_str())
        .bind(&code_hash)
        .bind(now)
        .bind(expires_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        debug!(contact = %contact.masked(), superseded, "Inserted OTP record");
        Ok(IssuedCode::new(code, expires_at))
    }

    async fn verify(&self, contact: &Contact, submitted_code: &str) -> DomainResult<VerifyOutcome> {
        let mut tx = self.lock_contact(contact).await?;

        let row = sqlx::query(SELECT_CURRENT_FOR_UPDATE)
            .bind(contact.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error)?;

        let Some(row) = row else {
            tx.commit().await.map_err(db_error)?;
            return Ok(VerifyOutcome::NotFound);
        };

        let mut record = record_from_row(&row)?;
        let before = record.clone();
        let outcome = record.check(
            &hash_code(contact.as_str(), submitted_code),
            self.policy.max_attempts,
            self.clock.now(),
        );

        if record != before {
            sqlx::query(
                "UPDATE otp_verifications \
                 SET attempts = $2, state = $3, consumed_at = $4, verified = $5 \
                 WHERE id = $1",
            )
            .bind(record.id)
            .bind(record.attempts as i32)
            .bind(record.state.as_str())
            .bind(record.consumed_at)
            .bind(record.state == RecordState::Consumed)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        Ok(outcome)
    }

    async fn is_verified(&self, contact: &Contact) -> DomainResult<bool> {
        let row = sqlx::query(SELECT_LATEST)
            .bind(contact.as_str())
            .fetch_optional(self.pool.get_pool())
            .await
            .map_err(db_error)?;

        let Some(row) = row else {
            return Ok(false);
        };

        let record = record_from_row(&row)?;
        let now = self.clock.now();
        Ok(match (record.state, record.consumed_at) {
            (RecordState::Consumed, Some(consumed_at)) => now - consumed_at <= self.policy.retention,
            _ => false,
        })
    }

    async fn purge_expired(&self, older_than: DateTime<Utc>) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM otp_verifications WHERE expires_at < $1")
            .bind(older_than)
            .execute(self.pool.get_pool())
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> DomainResult<()> {
        if self.pool.health_check().await? {
            Ok(())
        } else {
            Err(DomainError::store_unavailable(
                "database health check returned an unexpected value",
            ))
        }
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
