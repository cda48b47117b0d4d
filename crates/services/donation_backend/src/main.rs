// File: services/donation_backend/src/main.rs
use donation_backend::build_app;
use donation_common::{config_error, internal_error, logging};
use donation_config::load_config;
use std::process;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() {
    logging::init();

    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            logging::log_error(config_error(e), "Failed to load configuration");
            process::exit(1);
        }
    };

    let app = build_app(config.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            logging::log_error(internal_error(e), &format!("Failed to bind {}", addr));
            process::exit(1);
        }
    };
    info!("Donation server running on port {}", config.server.port);
    info!("Environment: {}", config.environment);
    info!("Serving static files from {}", config.static_dir);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        logging::log_error(internal_error(e), "Server error");
        process::exit(1);
    }
}
