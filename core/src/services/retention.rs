//! Retention cleanup for expired OTP records
//!
//! Records stay readable for a while after they expire so that late
//! submissions get `expired` rather than `not_found`, and so the status
//! lookup can see consumed records. This service deletes them once they are
//! past the retention horizon.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use ov_shared::OtpConfig;

use crate::errors::DomainResult;
use crate::repositories::VerificationStore;
use crate::services::clock::{Clock, SystemClock};

/// Configuration for the retention service
#[derive(Debug, Clone)]
pub struct RetentionConfig {
    /// How often to run cleanup
    pub interval: Duration,
    /// How long past `expires_at` a record is kept
    pub retention: chrono::Duration,
    /// Whether to run the background task at all
    pub enabled: bool,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self::from(&OtpConfig::default())
    }
}

impl From<&OtpConfig> for RetentionConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.cleanup_interval_seconds.max(1)),
            retention: chrono::Duration::seconds(config.record_retention_seconds as i64),
            enabled: config.cleanup_interval_seconds > 0,
        }
    }
}

/// Result of a cleanup cycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Records deleted by the store
    pub records_purged: u64,
    /// Records whose `expires_at` was before this instant were eligible
    pub horizon: Option<DateTime<Utc>>,
}

/// Service that periodically purges records past retention
pub struct RetentionService<S: VerificationStore + ?Sized + 'static> {
    store: Arc<S>,
    config: RetentionConfig,
    clock: Arc<dyn Clock>,
}

impl<S: VerificationStore + ?Sized + 'static> RetentionService<S> {
    pub fn new(store: Arc<S>, config: RetentionConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<S>, config: RetentionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> DomainResult<CleanupResult> {
        let horizon = self.clock.now() - self.config.retention;
        let records_purged = self.store.purge_expired(horizon).await?;

        if records_purged > 0 {
            info!(
                records_purged,
                backend = self.store.backend_name(),
                event = "otp_records_purged",
                "Purged expired verification records"
            );
        }

        Ok(CleanupResult {
            records_purged,
            horizon: Some(horizon),
        })
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Retention cleanup is disabled");
            return None;
        }

        Some(tokio::spawn(async move {
            info!(
                interval_secs = self.config.interval.as_secs(),
                "Retention cleanup started"
            );

            let mut interval_timer = tokio::time::interval(self.config.interval);
            interval_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!(error = %e, "Retention cleanup cycle failed");
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Contact, ContactType};
    use crate::repositories::{InMemoryVerificationStore, StorePolicy};
    use crate::services::clock::ManualClock;

    fn contact(raw: &str) -> Contact {
        Contact::parse(raw, ContactType::Email).unwrap()
    }

    #[tokio::test]
    async fn test_cleanup_respects_retention() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = Arc::new(InMemoryVerificationStore::with_clock(
            StorePolicy::default(),
            clock.clone(),
        ));
        let config = RetentionConfig {
            interval: Duration::from_secs(60),
            retention: chrono::Duration::hours(1),
            enabled: true,
        };
        let service = RetentionService::with_clock(store.clone(), config, clock.clone());

        store.issue(&contact("a@example.com")).await.unwrap();

        // Expired but still inside retention
        clock.advance(chrono::Duration::minutes(30));
        assert_eq!(service.run_cleanup().await.unwrap().records_purged, 0);

        clock.advance(chrono::Duration::hours(1));
        assert_eq!(service.run_cleanup().await.unwrap().records_purged, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_zero_interval_disables_cleanup() {
        let config = RetentionConfig::from(&OtpConfig {
            cleanup_interval_seconds: 0,
            ..Default::default()
        });
        assert!(!config.enabled);
    }

    #[tokio::test]
    async fn test_disabled_service_spawns_nothing() {
        let store = Arc::new(InMemoryVerificationStore::default());
        let config = RetentionConfig {
            enabled: false,
            ..Default::default()
        };
        let service = Arc::new(RetentionService::new(store, config));
        assert!(service.start_background_task().is_none());
    }
}
