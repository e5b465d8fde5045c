//! CORS middleware configuration for browser clients.
//!
//! Development accepts any origin. Production accepts the origins listed in
//! `ALLOWED_ORIGINS`, falling back to any origin when the list is empty.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ov_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the given environment.
pub fn create_cors(environment: Environment, config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(config.max_age);

    if !environment.is_production() {
        tracing::info!("Configuring CORS for development environment");
        return cors.allow_any_origin();
    }

    if config.allows_any_origin() {
        tracing::warn!("ALLOWED_ORIGINS is empty in production, accepting any origin");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| {
            tracing::info!(origin = %origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_production_rejects_unknown_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://ynow.app".to_string()],
            max_age: 600,
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Production, &config))
                .route("/otp/request", web::post().to(ok)),
        )
        .await;

        let allowed = test::TestRequest::post()
            .uri("/otp/request")
            .insert_header((header::ORIGIN, "https://ynow.app"))
            .to_request();
        let resp = test::call_service(&app, allowed).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://ynow.app"
        );

        let rejected = test::TestRequest::post()
            .uri("/otp/request")
            .insert_header((header::ORIGIN, "https://evil.example"))
            .to_request();
        let resp = test::try_call_service(&app, rejected).await;
        assert!(resp.map(|r| r.status() != StatusCode::OK).unwrap_or(true));
    }

    #[actix_web::test]
    async fn test_development_answers_preflight_for_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Development, &CorsConfig::default()))
                .route("/otp/verify", web::post().to(ok)),
        )
        .await;

        let preflight = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/otp/verify")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let resp = test::call_service(&app, preflight).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
