//! Application state and route table

use actix_web::web;

use ov_core::repositories::VerificationStore;
use ov_core::services::{NotificationSender, OtpService};

use crate::handlers::{method_not_allowed, not_found};
use crate::routes::{health::health_check, otp};

/// Coordinator over runtime-selected store and sender
pub type DynOtpService = OtpService<dyn VerificationStore, dyn NotificationSender>;

/// Application state that holds shared services
pub struct AppState {
    pub otp_service: DynOtpService,
}

impl AppState {
    pub fn new(otp_service: DynOtpService) -> Self {
        Self { otp_service }
    }
}

/// Register every route
///
/// Each path answers its own method and returns a JSON 405 for any other;
/// unknown paths get a JSON 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(post_resource("/otp/request", otp::request_code))
        .service(post_resource("/otp/verify", otp::verify_code))
        .service(post_resource("/api/send-otp", otp::request_code))
        .service(post_resource("/api/verify-otp", otp::verify_code))
        .service(
            web::resource("/otp/status")
                .route(web::get().to(otp::status))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/health")
                .route(web::get().to(health_check))
                .default_service(web::to(method_not_allowed)),
        )
        .default_service(web::to(not_found));
}

fn post_resource<F, Args>(path: &str, handler: F) -> actix_web::Resource
where
    F: actix_web::Handler<Args>,
    Args: actix_web::FromRequest + 'static,
    F::Output: actix_web::Responder + 'static,
{
    web::resource(path)
        .route(web::post().to(handler))
        .default_service(web::to(method_not_allowed))
}
