//! # Blogicum Admin Server
//!
//! Actix-web entry point for the blog admin console.

use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Blogicum admin server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(config.database.as_ref()).await;

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(observability::propagate_request_id))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(handlers::json_config())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
