use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let state = web::Data::new(state);

    tracing::info!("Starting Firewatch server on {}", bind_addr);

    HttpServer::new(move || {
        // The front-end runs on a separate dev server
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(api::status::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
            .configure(api::weather::configure)
            .configure(api::wildfire::configure)
            .configure(api::chat::configure)
            .configure(api::analyze::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
