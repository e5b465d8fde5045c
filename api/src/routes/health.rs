use std::collections::HashMap;
use std::time::Instant;

use actix_web::{web, HttpResponse};
use chrono::Utc;

use ov_shared::{HealthResponse, HealthStatus, ServiceHealth};

use crate::app::AppState;

/// Handler for `GET /health`
///
/// Answers `200` while the store is reachable and `503` otherwise.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let started = Instant::now();
    let probe = state.otp_service.health_check().await;
    let response_time_ms = Some(started.elapsed().as_millis() as u64);

    let store_health = match &probe {
        Ok(()) => ServiceHealth {
            status: HealthStatus::Healthy,
            message: None,
            response_time_ms,
        },
        Err(e) => ServiceHealth {
            status: HealthStatus::Unhealthy,
            message: Some(e.error_code().to_string()),
            response_time_ms,
        },
    };

    let status = store_health.status;
    let mut services = HashMap::new();
    services.insert(
        format!("store:{}", state.otp_service.store().backend_name()),
        store_health,
    );

    let body = HealthResponse {
        status,
        services,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    match status {
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(body),
        _ => HttpResponse::Ok().json(body),
    }
}
