use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;

use ov_api::{configure, json_config, middleware::create_cors, telemetry, AppState};
use ov_core::services::{OtpService, OtpServiceConfig, RetentionConfig, RetentionService};
use ov_infra::{create_notification_sender, create_verification_store};
use ov_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    telemetry::init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        store = %config.store.backend,
        "Starting YNOW verification service"
    );

    let store = create_verification_store(&config)
        .await
        .context("failed to initialize the verification store")?;
    let sender =
        create_notification_sender(&config).context("failed to initialize notification senders")?;

    let otp_service = OtpService::new(store.clone(), sender, OtpServiceConfig::from(&config.otp));
    let state = web::Data::new(AppState::new(otp_service));

    let retention = Arc::new(RetentionService::new(store, RetentionConfig::from(&config.otp)));
    let cleanup_task = retention.start_background_task();

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let environment = config.environment;
    let cors_config = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(create_cors(environment, &cors_config))
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .app_data(json_config(max_payload_size))
            .configure(configure)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    info!("Server stopped");
    Ok(())
}
